use std::fmt::Write;

use crate::models::mapping::MappingDocument;

/// JavaScript replacement for the quiz's `getImagePairs()`, meant to be pasted by hand.
pub fn render_javascript(mapping: &MappingDocument, mapping_file: &str) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_javascript(&mut out, mapping, mapping_file);
    out
}

fn write_javascript(
    out: &mut String,
    mapping: &MappingDocument,
    mapping_file: &str,
) -> std::fmt::Result {
    writeln!(out, "// Replace the getImagePairs() method in your FakeFinderQuiz class with this:")?;
    writeln!(out)?;
    writeln!(out, "getImagePairs() {{")?;
    writeln!(out, "    // Load mapping from external file")?;
    writeln!(out, "    const imageMap = {{")?;
    for (key, path) in mapping.images.iter() {
        writeln!(out, "        '{}': '{}',", key, path)?;
    }
    writeln!(out, "    }};")?;
    writeln!(out)?;
    writeln!(out, "    // Create pairs for quiz questions")?;
    writeln!(out, "    const pairs = [")?;
    let last = mapping.pairs.len().saturating_sub(1);
    for (i, pair) in mapping.pairs.iter().enumerate() {
        let comma = if i < last { "," } else { "" };
        writeln!(
            out,
            "        {{ primary: imageMap['{}'], secondary: imageMap['{}'], key: '{}' }}{}",
            pair.real_key, pair.fake_key, pair.id, comma
        )?;
    }
    writeln!(out, "    ];")?;
    writeln!(out)?;
    writeln!(out, "    // Shuffle the pairs to add randomness")?;
    writeln!(out, "    return this.shuffleArray(pairs);")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "// Alternative: Load mapping from JSON file dynamically")?;
    writeln!(out, "// async loadImageMapping() {{")?;
    writeln!(out, "//     try {{")?;
    writeln!(out, "//         const response = await fetch('{}');", mapping_file)?;
    writeln!(out, "//         const mapping = await response.json();")?;
    writeln!(out, "//         return mapping.pairs;")?;
    writeln!(out, "//     }} catch (error) {{")?;
    writeln!(out, "//         console.error('Error loading image mapping:', error);")?;
    writeln!(out, "//         return [];")?;
    writeln!(out, "//     }}")?;
    writeln!(out, "// }}")?;
    Ok(())
}
