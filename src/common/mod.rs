pub mod errors;

pub const DEFAULT_REAL_IMAGE_COUNT: usize = 56;

pub const DEFAULT_FAKE_IMAGE_COUNT: usize = 56;

pub const DEFAULT_IMAGE_EXTENSION: &str = ".jpg";

pub const DEFAULT_MAPPING_FILE: &str = "image_mapping.json";

pub const DEFAULT_IMAGES_DIR: &str = "images";

pub const DEFAULT_BACKUP_DIR: &str = "images_backup";

/// Directory written in front of every filename in the mapping document.
pub const DEFAULT_PATH_PREFIX: &str = "images";

pub const RANDOM_NAME_LENGTH: usize = 12;

pub const RENAME_FLAG: &str = "--rename";

pub const ENV_PREFIX: &str = "MAPPING_";

pub const BANNER_WIDTH: usize = 60;
