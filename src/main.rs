use anyhow::Result;
use log::info;
use std::io;

mod bootstrap;
mod common;
mod config;
mod models;
mod operations;
mod workflow;

use crate::bootstrap::setup::initialize_logger;
use crate::common::errors::handle_error;
use crate::common::RENAME_FLAG;
use crate::config::AppConfig;
use crate::workflow::commit::{CommitOutcome, run_commit};
use crate::workflow::preview::run_preview;

fn run(rename: bool) -> Result<()> {
    let config = AppConfig::load()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut rng = rand::rng();

    if rename {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        match run_commit(&config, &mut rng, &mut input, &mut out)? {
            CommitOutcome::Cancelled => info!("Nothing was changed"),
            CommitOutcome::Completed {
                mapping,
                report,
                source,
            } => info!(
                "{:?} filenames: {} pairs mapped, {} renamed, {} missing, {} blocked",
                source,
                mapping.pairs.len(),
                report.renamed.len(),
                report.missing.len(),
                report.blocked.len()
            ),
        }
    } else {
        run_preview(&config, &mut rng, &mut out)?;
    }
    Ok(())
}

fn main() {
    if let Err(e) = initialize_logger() {
        eprintln!("Failed to initialize logger: {:?}", e);
    }

    let rename = std::env::args().skip(1).any(|arg| arg == RENAME_FLAG);
    if let Err(e) = run(rename) {
        let _ = handle_error(e);
        std::process::exit(1);
    }
}
