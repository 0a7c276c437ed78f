use anyhow::{Context, Result, bail};
use dotenv::dotenv;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::common::{
    DEFAULT_BACKUP_DIR, DEFAULT_FAKE_IMAGE_COUNT, DEFAULT_IMAGE_EXTENSION, DEFAULT_IMAGES_DIR,
    DEFAULT_MAPPING_FILE, DEFAULT_PATH_PREFIX, DEFAULT_REAL_IMAGE_COUNT, ENV_PREFIX,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Number of `real_<i>` slots
    pub real_count: usize,
    /// Number of `fake_<i>` slots
    pub fake_count: usize,
    /// Extension shared by originals and generated names, including the dot
    pub extension: String,
    pub mapping_file: PathBuf,
    /// Directory holding the original images, renamed in place
    pub images_dir: PathBuf,
    pub backup_dir: PathBuf,
    /// Client-relative directory written in front of each filename
    pub path_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            real_count: DEFAULT_REAL_IMAGE_COUNT,
            fake_count: DEFAULT_FAKE_IMAGE_COUNT,
            extension: DEFAULT_IMAGE_EXTENSION.to_string(),
            mapping_file: PathBuf::from(DEFAULT_MAPPING_FILE),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            backup_dir: PathBuf::from(DEFAULT_BACKUP_DIR),
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
        }
    }
}

impl AppConfig {
    /// Read `.env` (if any) and `MAPPING_*` variables on top of the defaults.
    pub fn load() -> Result<Self> {
        dotenv().ok();
        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<AppConfig>()
            .context("failed to read MAPPING_* environment variables")?;
        config.validate()?;
        info!(
            "Config: {} real, {} fake, extension {}, mapping file {}",
            config.real_count,
            config.fake_count,
            config.extension,
            config.mapping_file.display()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.extension.starts_with('.') || self.extension.len() < 2 {
            bail!(
                "image extension {:?} must start with '.' and name a type",
                self.extension
            );
        }
        Ok(())
    }

    pub fn total_images(&self) -> usize {
        self.real_count + self.fake_count
    }

    pub fn pair_count(&self) -> usize {
        self.real_count.min(self.fake_count)
    }

    /// Same configuration rooted under `base`, used to point a run at another directory.
    pub fn rooted_at(&self, base: &Path) -> Self {
        Self {
            mapping_file: base.join(&self.mapping_file),
            images_dir: base.join(&self.images_dir),
            backup_dir: base.join(&self.backup_dir),
            ..self.clone()
        }
    }
}
