//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use mirror_core::PartialRunConfig;

/// Mirror a source directory onto a replica, periodically.
///
/// Positional arguments follow the order SOURCE REPLICA INTERVAL COUNT LOG_FILE.
/// Any of them may instead come from a config file; positional values win.
///
/// Examples:
///   mirror ./src ./backup 60 10 sync.log   # 10 passes, one minute apart
///   mirror --config mirror.toml            # everything from a file
///   mirror --config mirror.toml --dry-run  # show what would change
#[derive(Parser, Debug)]
#[command(name = "mirror")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to mirror from
    pub source: Option<PathBuf>,

    /// Directory kept identical to the source
    pub replica: Option<PathBuf>,

    /// Seconds to wait between passes
    pub interval: Option<u64>,

    /// Number of passes to run
    pub count: Option<u64>,

    /// Audit log file, appended to
    pub log_file: Option<PathBuf>,

    /// Read run parameters from a .toml, .json or .yaml file
    #[arg(short, long, env = "MIRROR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log planned changes without touching the replica
    #[arg(long)]
    pub dry_run: bool,

    /// Do not echo audit lines to stdout
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Run parameters given on the command line.
    pub fn overrides(&self) -> PartialRunConfig {
        PartialRunConfig {
            source: self.source.clone(),
            replica: self.replica.clone(),
            interval_seconds: self.interval,
            count: self.count,
            log_file: self.log_file.clone(),
        }
    }
}
