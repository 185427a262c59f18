//! SyncEngine implementation

use std::path::{Path, PathBuf};

use crate::event::SyncEvent;
use crate::log::LogSink;
use crate::Result;

use super::report::SyncReport;
use super::{directories, files, prune};

/// Options for a synchronization pass
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// If true, plan changes without modifying the filesystem.
    /// Log lines read "[dry-run] Would ..."
    pub dry_run: bool,
}

/// Mirrors one source tree onto one replica tree.
///
/// The engine holds no state between passes; every pass is re-derived from
/// what is on disk.
#[derive(Debug, Clone)]
pub struct SyncEngine {
    source: PathBuf,
    replica: PathBuf,
    options: SyncOptions,
}

impl SyncEngine {
    pub fn new(source: impl Into<PathBuf>, replica: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            replica: replica.into(),
            options: SyncOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn replica(&self) -> &Path {
        &self.replica
    }

    pub fn options(&self) -> SyncOptions {
        self.options
    }

    /// Create every source directory that is missing from the replica.
    ///
    /// Never removes anything.
    ///
    /// # Errors
    ///
    /// Only a sink failure is returned; creation failures are logged.
    pub fn ensure_directories(&self, sink: &mut dyn LogSink) -> Result<SyncReport> {
        directories::ensure_directories(self, sink)
    }

    /// Copy source files that are missing from the replica or differ in content.
    ///
    /// # Errors
    ///
    /// Only a sink failure is returned; copy failures are logged.
    pub fn ensure_files(&self, sink: &mut dyn LogSink) -> Result<SyncReport> {
        files::ensure_files(self, sink)
    }

    /// Remove replica files and directories that have no source counterpart.
    ///
    /// # Errors
    ///
    /// Only a sink failure is returned; removal failures are logged.
    pub fn prune_extraneous(&self, sink: &mut dyn LogSink) -> Result<SyncReport> {
        prune::prune_extraneous(self, sink)
    }

    /// One full pass: directories, then files, then pruning.
    ///
    /// Pruning runs last so it sees the replica after all copies landed.
    pub fn run_pass(&self, sink: &mut dyn LogSink) -> Result<SyncReport> {
        tracing::debug!(
            source = %self.source.display(),
            replica = %self.replica.display(),
            dry_run = self.options.dry_run,
            "pass starting"
        );

        let mut report = self.ensure_directories(sink)?;
        report += self.ensure_files(sink)?;
        report += self.prune_extraneous(sink)?;

        tracing::debug!(?report, "pass complete");
        Ok(report)
    }

    /// Write an event to the sink and mirror it to tracing.
    pub(super) fn record(&self, sink: &mut dyn LogSink, event: &SyncEvent) -> Result<()> {
        let message = if self.options.dry_run {
            event.dry_run_message()
        } else {
            event.to_string()
        };

        if event.is_error() {
            tracing::warn!("{}", message);
        } else {
            tracing::debug!("{}", message);
        }

        sink.append(&message)
    }
}

/// Run a single pass with default options.
pub fn run_pass(source: &Path, replica: &Path, sink: &mut dyn LogSink) -> Result<SyncReport> {
    SyncEngine::new(source, replica).run_pass(sink)
}

/// Human-readable cause of a single-path failure, without repeating the path.
pub(super) fn failure_detail(err: &mirror_fs::Error) -> String {
    err.io_source()
        .map(ToString::to_string)
        .unwrap_or_else(|| err.to_string())
}
