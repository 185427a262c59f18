//! folder-mirror CLI
//!
//! Runs a fixed number of one-way synchronization passes from a source
//! directory to a replica, appending every change to an audit log.

mod cli;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use mirror_core::{PartialRunConfig, RunConfig, SyncEngine, SyncOptions, open_log_file, run_schedule};

use cli::Cli;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config = resolve_config(&cli)?;
    config.validate()?;
    tracing::debug!(?config, "run parameters");

    let mut sink = open_log_file(&config.log_file)?.with_echo(!cli.quiet);
    let engine = SyncEngine::new(&config.source, &config.replica).with_options(SyncOptions {
        dry_run: cli.dry_run,
    });

    let total = run_schedule(&engine, config.schedule(), &mut sink, std::thread::sleep)?;

    if total.errors > 0 {
        tracing::warn!(errors = total.errors, "some entries could not be synchronized; see the audit log");
    }
    Ok(())
}

/// Config file values, overridden by command-line values.
fn resolve_config(cli: &Cli) -> Result<RunConfig> {
    let base = match &cli.config {
        Some(path) => PartialRunConfig::load(path)?,
        None => PartialRunConfig::default(),
    };
    Ok(base.merge(cli.overrides()).resolve()?)
}
