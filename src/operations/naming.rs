use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use std::collections::HashSet;

use crate::common::RANDOM_NAME_LENGTH;

/// A single `[a-z0-9]{12}` name followed by `extension`.
pub fn generate_random_filename<R: Rng + ?Sized>(rng: &mut R, extension: &str) -> String {
    let mut name: String = rng
        .sample_iter(&Alphanumeric)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .take(RANDOM_NAME_LENGTH)
        .map(char::from)
        .collect();
    name.push_str(extension);
    name
}

/// Draw names until `count` distinct ones exist, in the order they were first drawn.
pub fn generate_unique_filenames<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    extension: &str,
) -> Vec<String> {
    let mut seen = HashSet::with_capacity(count);
    let mut filenames = Vec::with_capacity(count);
    while filenames.len() < count {
        let candidate = generate_random_filename(rng, extension);
        if seen.insert(candidate.clone()) {
            filenames.push(candidate);
        }
    }
    filenames
}

/// Matches exactly the names `generate_random_filename` produces for `extension`.
pub fn filename_pattern(extension: &str) -> Regex {
    Regex::new(&format!(
        "^[a-z0-9]{{{}}}{}$",
        RANDOM_NAME_LENGTH,
        regex::escape(extension)
    ))
    .expect("escaped extension always forms a valid pattern")
}
