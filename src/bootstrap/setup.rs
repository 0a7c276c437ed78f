//! Setup module - handles startup tasks
//!
//! Includes:
//! - Logger initialization
//! - Images folder precondition check

use anstyle::{AnsiColor, Style};
use anyhow::{Result, bail};
use env_logger::{Builder, Env};
use log::kv::Key;
use std::io::Write;
use std::path::Path;

// ────────────────────────────────────────────────────────────────
// Logger Initialization
// ────────────────────────────────────────────────────────────────

const DIM: Style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::BrightBlack)));
const CYAN: Style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Cyan)));

/// Reformat a `duration` key-value such as `1.234567ms` to `1.23 ms`.
fn format_duration(raw: &str) -> String {
    if let Some(idx) = raw.find(|c: char| c.is_alphabetic()) {
        let (num, unit) = (&raw[..idx], &raw[idx..]);
        if let Ok(val) = num.parse::<f32>() {
            return format!("{:.2} {}", val, unit);
        }
    }
    raw.to_string()
}

/// Initialize the stderr logger. `RUST_LOG` overrides the default `info` filter.
pub fn initialize_logger() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = buf.timestamp();
            let level_style = buf.default_level_style(record.level());

            let dur_raw = record
                .key_values()
                .get(Key::from("duration"))
                .map(|v| format_duration(&v.to_string()))
                .unwrap_or_default();

            let dur = if dur_raw.is_empty() {
                " ".repeat(10)
            } else {
                format!("{}{:>10}{}", CYAN.render(), dur_raw, CYAN.render_reset())
            };

            writeln!(
                buf,
                "{}{}{} {}{:<5}{} {}{}{}",
                DIM.render(),
                ts,
                DIM.render_reset(),
                level_style.render(),
                record.level(),
                level_style.render_reset(),
                DIM.render(),
                record.target(),
                DIM.render_reset(),
            )?;

            let message = format!("{}", record.args());
            let subsequent_indent = " ".repeat(11);
            let mut lines = message.lines();

            if let Some(first_line) = lines.next() {
                writeln!(buf, "{} {}", dur, first_line)?;
            }
            for line in lines {
                writeln!(buf, "{}{}", subsequent_indent, line)?;
            }

            Ok(())
        })
        .target(env_logger::Target::Stderr)
        .try_init()?;
    Ok(())
}

// ────────────────────────────────────────────────────────────────
// Folder Check
// ────────────────────────────────────────────────────────────────

/// Both modes need the images folder before anything is generated or moved.
pub fn check_images_folder(images_dir: &Path) -> Result<()> {
    if !images_dir.is_dir() {
        bail!(
            "'{}' directory not found! Make sure you're running this from the project root directory.",
            images_dir.display()
        );
    }
    Ok(())
}
