use serde::{Deserialize, Serialize};

use crate::models::ImageKind;
use crate::models::image_table::ImageTable;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metadata {
    pub total_images: usize,
    pub real_count: usize,
    pub fake_count: usize,
    pub generated_at: String,
}

/// One quiz question: a real slot shown next to a fake slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pair {
    pub id: String,
    pub real: String,
    pub fake: String,
    pub real_key: String,
    pub fake_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MappingDocument {
    pub metadata: Metadata,
    pub images: ImageTable,
    pub pairs: Vec<Pair>,
}

impl MappingDocument {
    pub fn count(&self, kind: ImageKind) -> usize {
        match kind {
            ImageKind::Real => self.metadata.real_count,
            ImageKind::Fake => self.metadata.fake_count,
        }
    }

    /// Bare filenames of every `kind` slot in index order, with `prefix/` stripped.
    ///
    /// `None` when a slot is missing or its path does not live under `prefix`.
    pub fn filenames(&self, kind: ImageKind, prefix: &str) -> Option<Vec<String>> {
        (0..self.count(kind))
            .map(|i| {
                self.images
                    .get(&kind.key(i))?
                    .strip_prefix(prefix)?
                    .strip_prefix('/')
                    .map(str::to_string)
            })
            .collect()
    }
}
