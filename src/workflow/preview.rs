use anyhow::Result;
use log::{info, warn};
use rand::Rng;
use std::io::Write;
use std::time::Instant;

use crate::bootstrap::setup::check_images_folder;
use crate::common::{BANNER_WIDTH, RENAME_FLAG};
use crate::config::AppConfig;
use crate::models::mapping::MappingDocument;
use crate::operations::companion::render_javascript;
use crate::operations::mapping::{build_mapping, write_mapping};
use crate::operations::naming::generate_unique_filenames;
use crate::workflow::{banner, generation_timestamp, print_summary};

/// Generate a fresh filename set, persist the mapping and print the companion code.
///
/// Original images are never touched.
pub fn run_preview<R: Rng + ?Sized, W: Write>(
    config: &AppConfig,
    rng: &mut R,
    out: &mut W,
) -> Result<MappingDocument> {
    writeln!(out, "FakeFinder Image Mapping Generator")?;
    writeln!(out, "{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(out)?;

    check_images_folder(&config.images_dir)?;
    let start_time = Instant::now();

    info!("Generating random filenames...");
    let real = generate_unique_filenames(rng, config.real_count, &config.extension);
    let fake = generate_unique_filenames(rng, config.fake_count, &config.extension);

    info!("Creating mapping file...");
    let mapping = build_mapping(
        &real,
        &fake,
        config.real_count,
        config.fake_count,
        &config.path_prefix,
        generation_timestamp(),
    )?;
    if mapping.images.is_empty() {
        warn!("No image slots configured, the mapping file will be empty");
    }
    write_mapping(&config.mapping_file, &mapping)?;
    info!(
        duration = &*format!("{:?}", start_time.elapsed());
        "Created {}", config.mapping_file.display()
    );

    print_summary(out, config, &mapping)?;

    banner(out, "JAVASCRIPT CODE FOR script.js")?;
    writeln!(out)?;
    write!(
        out,
        "{}",
        render_javascript(&mapping, &config.mapping_file.to_string_lossy())
    )?;

    banner(out, "NEXT STEPS:")?;
    writeln!(
        out,
        "1. Run this tool with {} to actually rename the files",
        RENAME_FLAG
    )?;
    writeln!(out, "2. Copy the JavaScript code above to your script.js file")?;
    writeln!(out, "3. Test your application!")?;
    writeln!(out)?;
    writeln!(out, "To rename files now, run: image-mapping {}", RENAME_FLAG)?;
    out.flush()?;

    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::mapping::read_mapping;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::fs;

    fn setup(real: usize, fake: usize) -> (tempfile::TempDir, AppConfig) {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            real_count: real,
            fake_count: fake,
            ..AppConfig::default()
        }
        .rooted_at(dir.path());
        fs::create_dir_all(&config.images_dir).unwrap();
        (dir, config)
    }

    #[test]
    fn preview_writes_mapping_and_prints_code_without_touching_images() {
        let (_dir, config) = setup(2, 2);
        fs::write(config.images_dir.join("real_0.jpg"), b"x").unwrap();

        let mut out = Vec::new();
        let mapping = run_preview(&config, &mut StdRng::seed_from_u64(1), &mut out).unwrap();

        assert_eq!(read_mapping(&config.mapping_file).unwrap(), mapping);
        assert!(config.images_dir.join("real_0.jpg").exists());
        assert!(!config.backup_dir.exists());

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("FakeFinder Image Mapping Generator\n"));
        assert!(text.contains("   - Total pairs: 2"));
        assert!(text.contains("JAVASCRIPT CODE FOR script.js"));
        assert!(text.contains("getImagePairs() {"));
        assert!(text.contains("NEXT STEPS:"));
    }

    #[test]
    fn two_previews_differ_in_names_but_not_counts() {
        let (_dir, config) = setup(56, 56);
        let mut rng = rand::rng();

        run_preview(&config, &mut rng, &mut Vec::new()).unwrap();
        let first = read_mapping(&config.mapping_file).unwrap();
        run_preview(&config, &mut rng, &mut Vec::new()).unwrap();
        let second = read_mapping(&config.mapping_file).unwrap();

        assert_ne!(first.images, second.images);
        assert_eq!(first.metadata.real_count, second.metadata.real_count);
        assert_eq!(first.metadata.fake_count, second.metadata.fake_count);
        assert_eq!(first.metadata.total_images, second.metadata.total_images);
        assert_eq!(second.pairs.len(), 56);
    }

    #[test]
    fn preview_without_images_folder_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::default().rooted_at(dir.path());

        let mut out = Vec::new();
        assert!(run_preview(&config, &mut rand::rng(), &mut out).is_err());
        assert!(!config.mapping_file.exists());
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("getImagePairs"));
    }
}
