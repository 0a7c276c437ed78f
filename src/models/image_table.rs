use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Logical key to relative path, kept in insertion order.
///
/// Serialized as a JSON object whose members appear in the order they were
/// inserted, so `real_10` stays after `real_9` instead of sorting next to `real_1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageTable {
    entries: Vec<(String, String)>,
}

impl ImageTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert or replace; a replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, path: impl Into<String>) {
        let key = key.into();
        let path = path.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = path,
            None => self.entries.push((key, path)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, path)| path.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, p)| (k.as_str(), p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ImageTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, path) in &self.entries {
            map.serialize_entry(key, path)?;
        }
        map.end()
    }
}

struct ImageTableVisitor;

impl<'de> Visitor<'de> for ImageTableVisitor {
    type Value = ImageTable;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of image keys to relative paths")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut table = ImageTable::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, path)) = access.next_entry::<String, String>()? {
            table.insert(key, path);
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for ImageTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ImageTableVisitor)
    }
}
