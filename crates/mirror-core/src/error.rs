//! Error types for mirror-core

use std::path::PathBuf;

/// Result type for mirror-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop a pass or a schedule.
///
/// Per-entry filesystem failures are not represented here: they are written
/// to the audit log and counted in the [`SyncReport`](crate::SyncReport).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),

    /// The audit log rejected a line
    #[error("Audit log is not writable: {source}")]
    LogSink {
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot open log file {path}: {source}")]
    LogFileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Log file {path} is locked by another mirror process")]
    LogFileLocked { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl Error {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
