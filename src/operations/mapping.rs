use anyhow::{Context, Result, ensure};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::models::ImageKind;
use crate::models::image_table::ImageTable;
use crate::models::mapping::{MappingDocument, Metadata, Pair};

/// Client-relative path of a generated file, e.g. `images/abc123def456.jpg`.
pub fn relative_path(prefix: &str, filename: &str) -> String {
    format!("{}/{}", prefix, filename)
}

/// Build the mapping document for the given filename sets.
///
/// Only the first `real_count` / `fake_count` names are used. The result is fully
/// determined by the arguments.
pub fn build_mapping(
    real_filenames: &[String],
    fake_filenames: &[String],
    real_count: usize,
    fake_count: usize,
    prefix: &str,
    generated_at: impl Into<String>,
) -> Result<MappingDocument> {
    ensure!(
        real_filenames.len() >= real_count,
        "{} real filenames given for {} real slots",
        real_filenames.len(),
        real_count
    );
    ensure!(
        fake_filenames.len() >= fake_count,
        "{} fake filenames given for {} fake slots",
        fake_filenames.len(),
        fake_count
    );

    let mut images = ImageTable::with_capacity(real_count + fake_count);
    for (kind, filenames, count) in [
        (ImageKind::Real, real_filenames, real_count),
        (ImageKind::Fake, fake_filenames, fake_count),
    ] {
        for (i, filename) in filenames.iter().take(count).enumerate() {
            images.insert(kind.key(i), relative_path(prefix, filename));
        }
    }

    let pairs = (0..real_count.min(fake_count))
        .map(|i| Pair {
            id: format!("pair_{}", i),
            real: relative_path(prefix, &real_filenames[i]),
            fake: relative_path(prefix, &fake_filenames[i]),
            real_key: ImageKind::Real.key(i),
            fake_key: ImageKind::Fake.key(i),
        })
        .collect();

    Ok(MappingDocument {
        metadata: Metadata {
            total_images: real_count + fake_count,
            real_count,
            fake_count,
            generated_at: generated_at.into(),
        },
        images,
        pairs,
    })
}

/// Write `mapping` as 2-space indented JSON, replacing whatever is at `path`.
pub fn write_mapping(path: &Path, mapping: &MappingDocument) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create mapping file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, mapping)
        .with_context(|| format!("failed to serialize mapping into {}", path.display()))?;
    writer.write_all(b"\n")?;
    writer
        .flush()
        .with_context(|| format!("failed to flush mapping file {}", path.display()))?;
    Ok(())
}

pub fn read_mapping(path: &Path) -> Result<MappingDocument> {
    let file = File::open(path)
        .with_context(|| format!("failed to open mapping file {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse mapping file {}", path.display()))
}
