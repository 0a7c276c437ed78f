use anyhow::{Context, Result};
use log::{info, warn};
use rand::Rng;
use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::time::Instant;

use crate::bootstrap::setup::check_images_folder;
use crate::config::AppConfig;
use crate::models::ImageKind;
use crate::models::mapping::MappingDocument;
use crate::operations::mapping::{build_mapping, read_mapping, write_mapping};
use crate::operations::naming::{filename_pattern, generate_unique_filenames};
use crate::operations::rename::{RenameReport, rename_files};
use crate::workflow::{generation_timestamp, print_summary};

/// Where the committed filename set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameSource {
    /// Taken from the mapping file already on disk (usually written by a preview run)
    Reused,
    Generated,
}

#[derive(Debug)]
pub enum CommitOutcome {
    Cancelled,
    Completed {
        mapping: MappingDocument,
        report: RenameReport,
        source: FilenameSource,
    },
}

/// Ask for confirmation, then persist the mapping and rename the originals.
///
/// Anything other than `y`/`Y` on `input` (EOF included) cancels before any write.
pub fn run_commit<R: Rng + ?Sized, I: BufRead, W: Write>(
    config: &AppConfig,
    rng: &mut R,
    input: &mut I,
    out: &mut W,
) -> Result<CommitOutcome> {
    check_images_folder(&config.images_dir)?;

    writeln!(out, "Executing rename operations...")?;
    writeln!(out, "This will permanently rename your image files!")?;
    writeln!(
        out,
        "   A backup will be created in '{}' directory",
        config.backup_dir.display()
    )?;
    writeln!(out)?;

    if !confirm(input, out)? {
        writeln!(out, "Operation cancelled.")?;
        return Ok(CommitOutcome::Cancelled);
    }

    let start_time = Instant::now();
    let (real, fake, source) = resolve_filenames(config, rng);
    let mapping = build_mapping(
        &real,
        &fake,
        config.real_count,
        config.fake_count,
        &config.path_prefix,
        generation_timestamp(),
    )?;
    write_mapping(&config.mapping_file, &mapping)?;
    info!("Created {}", config.mapping_file.display());

    let report = rename_files(config, &real, &fake)?;
    info!(
        duration = &*format!("{:?}", start_time.elapsed());
        "Renamed {} files, {} originals missing, {} blocked",
        report.renamed.len(), report.missing.len(), report.blocked.len()
    );

    print_summary(out, config, &mapping)?;
    writeln!(out)?;
    writeln!(out, "Rename operations completed!")?;
    if !report.missing.is_empty() {
        writeln!(
            out,
            "{} original files were missing; their mapping entries point at files that do not exist yet:",
            report.missing.len()
        )?;
        for missing in &report.missing {
            writeln!(out, "   - {} ({})", missing.key, missing.path.display())?;
        }
    }
    if !report.blocked.is_empty() {
        writeln!(
            out,
            "{} originals were left in place because their new name is already taken:",
            report.blocked.len()
        )?;
        for blocked in &report.blocked {
            writeln!(
                out,
                "   - {} ({} exists)",
                blocked.key,
                blocked.occupied.display()
            )?;
        }
    }
    writeln!(
        out,
        "Check '{}' for the complete mapping",
        config.mapping_file.display()
    )?;
    writeln!(
        out,
        "Original files backed up in '{}' directory",
        config.backup_dir.display()
    )?;
    out.flush()?;

    Ok(CommitOutcome::Completed {
        mapping,
        report,
        source,
    })
}

fn confirm<I: BufRead, W: Write>(input: &mut I, out: &mut W) -> Result<bool> {
    write!(out, "Continue? (y/N): ")?;
    out.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    writeln!(out)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Reuse the names of an existing mapping when it fits the configuration, else draw new ones.
fn resolve_filenames<R: Rng + ?Sized>(
    config: &AppConfig,
    rng: &mut R,
) -> (Vec<String>, Vec<String>, FilenameSource) {
    if config.mapping_file.exists() {
        match read_mapping(&config.mapping_file) {
            Ok(existing) => match reusable_filenames(config, &existing) {
                Some((real, fake)) => {
                    info!(
                        "Reusing filenames from {}",
                        config.mapping_file.display()
                    );
                    return (real, fake, FilenameSource::Reused);
                }
                None => warn!(
                    "{} cannot be reused, generating new filenames",
                    config.mapping_file.display()
                ),
            },
            Err(err) => warn!("{:#}, generating new filenames", err),
        }
    }

    info!("Generating random filenames...");
    let real = generate_unique_filenames(rng, config.real_count, &config.extension);
    let fake = generate_unique_filenames(rng, config.fake_count, &config.extension);
    (real, fake, FilenameSource::Generated)
}

/// Saved names are reused only when they are well formed, distinct across both sets,
/// and no slot would move a present original onto a file that already exists.
fn reusable_filenames(
    config: &AppConfig,
    existing: &MappingDocument,
) -> Option<(Vec<String>, Vec<String>)> {
    if existing.metadata.real_count != config.real_count
        || existing.metadata.fake_count != config.fake_count
    {
        return None;
    }

    let pattern = filename_pattern(&config.extension);
    let real = existing.filenames(ImageKind::Real, &config.path_prefix)?;
    let fake = existing.filenames(ImageKind::Fake, &config.path_prefix)?;

    let mut seen = HashSet::with_capacity(real.len() + fake.len());
    for name in real.iter().chain(&fake) {
        if !pattern.is_match(name) || !seen.insert(name.as_str()) {
            return None;
        }
    }

    for (kind, names) in [(ImageKind::Real, &real), (ImageKind::Fake, &fake)] {
        for (i, name) in names.iter().enumerate() {
            let original = config.images_dir.join(kind.original_name(i, &config.extension));
            if original.exists() && config.images_dir.join(name).exists() {
                return None;
            }
        }
    }

    Some((real, fake))
}
