use anyhow::{Context, Result, ensure};
use filetime::{FileTime, set_file_times};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::models::ImageKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedFile {
    pub key: String,
    pub original: PathBuf,
    pub renamed: PathBuf,
    pub backup: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFile {
    pub key: String,
    pub path: PathBuf,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenameReport {
    pub renamed: Vec<RenamedFile>,
    pub missing: Vec<MissingFile>,
    /// Originals left in place because their assigned name is already taken
    pub blocked: Vec<BlockedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedFile {
    pub key: String,
    pub original: PathBuf,
    pub occupied: PathBuf,
}

/// Back up and rename every `real_<i>` then `fake_<i>` original to its assigned name.
///
/// A missing original is logged and skipped. An original whose assigned name already
/// exists in the images directory is left untouched, and so is its backup. Any failing
/// copy or rename aborts the remaining slots; files handled before the failure stay
/// renamed, with their copies left in the backup directory.
pub fn rename_files(
    config: &AppConfig,
    real_filenames: &[String],
    fake_filenames: &[String],
) -> Result<RenameReport> {
    ensure!(
        real_filenames.len() >= config.real_count && fake_filenames.len() >= config.fake_count,
        "not enough generated filenames for the configured slots"
    );
    info!("Renaming files...");

    let progress = ProgressBar::new(config.total_images() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );

    let mut report = RenameReport::default();
    for (kind, filenames, count) in [
        (ImageKind::Real, real_filenames, config.real_count),
        (ImageKind::Fake, fake_filenames, config.fake_count),
    ] {
        for (i, new_name) in filenames.iter().take(count).enumerate() {
            let key = kind.key(i);
            progress.set_message(key.clone());
            let original_name = kind.original_name(i, &config.extension);
            let original = config.images_dir.join(&original_name);

            let renamed = config.images_dir.join(new_name);
            if original.exists() && renamed.exists() {
                progress.suspend(|| {
                    warn!(
                        "{} already exists, leaving {} in place",
                        renamed.display(),
                        original_name
                    )
                });
                report.blocked.push(BlockedFile {
                    key,
                    original,
                    occupied: renamed,
                });
            } else if original.exists() {
                let backup = config.backup_dir.join(&original_name);
                backup_then_rename(&original, &backup, &renamed, &config.backup_dir)?;
                progress.suspend(|| info!("Renamed: {} -> {}", original_name, new_name));
                report.renamed.push(RenamedFile {
                    key,
                    original,
                    renamed,
                    backup,
                });
            } else {
                progress.suspend(|| warn!("{} not found", original.display()));
                report.missing.push(MissingFile {
                    key,
                    path: original,
                });
            }
            progress.inc(1);
        }
    }
    progress.finish_and_clear();

    if !report.renamed.is_empty() {
        info!(
            "Backup created in '{}' directory",
            config.backup_dir.display()
        );
        info!("You can restore original names by copying files back from backup");
    }
    Ok(report)
}

/// Copy `original` into the backup directory, then move it to `renamed`. Never the other way round.
fn backup_then_rename(
    original: &Path,
    backup: &Path,
    renamed: &Path,
    backup_dir: &Path,
) -> Result<()> {
    fs::create_dir_all(backup_dir).with_context(|| {
        format!("failed to create backup directory {}", backup_dir.display())
    })?;

    fs::copy(original, backup).with_context(|| {
        format!(
            "failed to back up {} to {}",
            original.display(),
            backup.display()
        )
    })?;
    preserve_times(original, backup)?;

    fs::rename(original, renamed).with_context(|| {
        format!(
            "failed to rename {} to {}",
            original.display(),
            renamed.display()
        )
    })?;
    Ok(())
}

fn preserve_times(source: &Path, copy: &Path) -> Result<()> {
    let metadata = fs::metadata(source)
        .with_context(|| format!("failed to read metadata of {}", source.display()))?;
    set_file_times(
        copy,
        FileTime::from_last_access_time(&metadata),
        FileTime::from_last_modification_time(&metadata),
    )
    .with_context(|| format!("failed to copy timestamps onto {}", copy.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn config_in(base: &Path, real: usize, fake: usize) -> AppConfig {
        AppConfig {
            real_count: real,
            fake_count: fake,
            ..AppConfig::default()
        }
        .rooted_at(base)
    }

    fn listing(dir: &Path) -> BTreeSet<String> {
        match fs::read_dir(dir) {
            Ok(entries) => entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => BTreeSet::new(),
        }
    }

    fn names(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i:011}.jpg")).collect()
    }

    #[test]
    fn missing_original_is_skipped_and_others_are_renamed() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), 2, 2);
        fs::create_dir_all(&config.images_dir).unwrap();
        for name in ["real_0.jpg", "real_1.jpg", "fake_0.jpg"] {
            fs::write(config.images_dir.join(name), name).unwrap();
        }

        let real = names("r", 2);
        let fake = names("f", 2);
        let report = rename_files(&config, &real, &fake).unwrap();

        assert_eq!(report.renamed.len(), 3);
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].key, "fake_1");
        assert_eq!(report.missing[0].path, config.images_dir.join("fake_1.jpg"));

        let images = listing(&config.images_dir);
        let expected: BTreeSet<String> =
            [&real[0], &real[1], &fake[0]].into_iter().cloned().collect();
        assert_eq!(images, expected);

        let backups = listing(&config.backup_dir);
        let expected: BTreeSet<String> = ["real_0.jpg", "real_1.jpg", "fake_0.jpg"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(backups, expected);

        assert_eq!(
            fs::read_to_string(config.images_dir.join(&real[1])).unwrap(),
            "real_1.jpg"
        );
        assert_eq!(
            fs::read_to_string(config.backup_dir.join("fake_0.jpg")).unwrap(),
            "fake_0.jpg"
        );
    }

    #[test]
    fn second_run_only_warns() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), 2, 2);
        fs::create_dir_all(&config.images_dir).unwrap();
        for name in ["real_0.jpg", "real_1.jpg", "fake_0.jpg", "fake_1.jpg"] {
            fs::write(config.images_dir.join(name), name).unwrap();
        }
        let real = names("r", 2);
        let fake = names("f", 2);
        rename_files(&config, &real, &fake).unwrap();

        let images_before = listing(&config.images_dir);
        let backups_before = listing(&config.backup_dir);

        let report = rename_files(&config, &names("x", 2), &names("y", 2)).unwrap();
        assert!(report.renamed.is_empty());
        let missing: Vec<&str> = report.missing.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(missing, vec!["real_0", "real_1", "fake_0", "fake_1"]);
        assert_eq!(listing(&config.images_dir), images_before);
        assert_eq!(listing(&config.backup_dir), backups_before);
    }

    #[test]
    fn backup_directory_is_not_created_when_nothing_is_present() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), 1, 1);
        fs::create_dir_all(&config.images_dir).unwrap();

        let report = rename_files(&config, &names("r", 1), &names("f", 1)).unwrap();
        assert_eq!(report.missing.len(), 2);
        assert!(!config.backup_dir.exists());
    }

    #[test]
    fn backup_keeps_modification_time() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), 1, 0);
        fs::create_dir_all(&config.images_dir).unwrap();
        let original = config.images_dir.join("real_0.jpg");
        fs::write(&original, b"pixels").unwrap();
        let mtime = FileTime::from_unix_time(1_600_000_000, 0);
        filetime::set_file_mtime(&original, mtime).unwrap();

        rename_files(&config, &names("r", 1), &[]).unwrap();

        let backup = fs::metadata(config.backup_dir.join("real_0.jpg")).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&backup), mtime);
    }

    #[test]
    fn occupied_destination_keeps_both_files_and_the_backup() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), 1, 0);
        fs::create_dir_all(&config.images_dir).unwrap();
        fs::write(config.images_dir.join("real_0.jpg"), "OLD").unwrap();
        let real = names("r", 1);
        rename_files(&config, &real, &[]).unwrap();

        fs::write(config.images_dir.join("real_0.jpg"), "NEW").unwrap();
        let report = rename_files(&config, &real, &[]).unwrap();

        assert!(report.renamed.is_empty());
        assert_eq!(report.blocked.len(), 1);
        assert_eq!(report.blocked[0].key, "real_0");
        assert_eq!(report.blocked[0].occupied, config.images_dir.join(&real[0]));
        assert_eq!(
            fs::read_to_string(config.images_dir.join(&real[0])).unwrap(),
            "OLD"
        );
        assert_eq!(
            fs::read_to_string(config.images_dir.join("real_0.jpg")).unwrap(),
            "NEW"
        );
        assert_eq!(
            fs::read_to_string(config.backup_dir.join("real_0.jpg")).unwrap(),
            "OLD"
        );
    }

    #[test]
    fn too_few_names_is_rejected_before_touching_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), 2, 2);
        fs::create_dir_all(&config.images_dir).unwrap();
        fs::write(config.images_dir.join("real_0.jpg"), b"x").unwrap();

        assert!(rename_files(&config, &names("r", 1), &names("f", 2)).is_err());
        assert!(config.images_dir.join("real_0.jpg").exists());
        assert!(!config.backup_dir.exists());
    }
}
