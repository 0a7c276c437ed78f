pub mod commit;
pub mod preview;

use anyhow::Result;
use chrono::{Local, SecondsFormat};
use std::io::Write;

use crate::common::BANNER_WIDTH;
use crate::config::AppConfig;
use crate::models::mapping::MappingDocument;

/// Value stored in `metadata.generated_at`.
pub fn generation_timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

pub(crate) fn banner<W: Write>(out: &mut W, title: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(BANNER_WIDTH))?;
    Ok(())
}

pub(crate) fn print_summary<W: Write>(
    out: &mut W,
    config: &AppConfig,
    mapping: &MappingDocument,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Summary:")?;
    writeln!(out, "   - Real images: {}", mapping.metadata.real_count)?;
    writeln!(out, "   - Fake images: {}", mapping.metadata.fake_count)?;
    writeln!(out, "   - Total pairs: {}", mapping.pairs.len())?;
    writeln!(out, "   - Mapping file: {}", config.mapping_file.display())?;
    Ok(())
}
