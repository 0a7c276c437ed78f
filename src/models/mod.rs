pub mod image_table;
pub mod mapping;

use std::fmt;

/// Which side of a quiz pair a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Real,
    Fake,
}

impl ImageKind {
    pub const ALL: [ImageKind; 2] = [ImageKind::Real, ImageKind::Fake];

    pub fn prefix(self) -> &'static str {
        match self {
            ImageKind::Real => "real",
            ImageKind::Fake => "fake",
        }
    }

    /// Logical key of slot `index`, e.g. `real_3`.
    pub fn key(self, index: usize) -> String {
        format!("{}_{}", self.prefix(), index)
    }

    /// Canonical name of the original file, e.g. `fake_12.jpg`.
    pub fn original_name(self, index: usize, extension: &str) -> String {
        format!("{}{}", self.key(index), extension)
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}
