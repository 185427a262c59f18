//! Audit log message bodies
//!
//! The wording here is the audit log format; changing it breaks anyone
//! grepping the log.

use std::fmt;
use std::path::PathBuf;

/// A filesystem mutation, or a failed attempt at one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    DirectoryCreated { path: PathBuf },
    DirectoryCreateFailed { path: PathBuf, detail: String },
    FileCopied { src: PathBuf, dest: PathBuf },
    FileCopyFailed { src: PathBuf, dest: PathBuf, detail: String },
    FileRemoved { path: PathBuf },
    FileRemoveFailed { path: PathBuf, detail: String },
    DirectoryRemoved { path: PathBuf },
    DirectoryRemoveFailed { path: PathBuf, detail: String },
}

impl SyncEvent {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::DirectoryCreateFailed { .. }
                | Self::FileCopyFailed { .. }
                | Self::FileRemoveFailed { .. }
                | Self::DirectoryRemoveFailed { .. }
        )
    }

    /// Message body as planned rather than performed.
    ///
    /// Failure events cannot occur in a dry run and render unchanged.
    pub fn dry_run_message(&self) -> String {
        match self {
            Self::DirectoryCreated { path } => {
                format!("[dry-run] Would create directory: {}", path.display())
            }
            Self::FileCopied { src, dest } => format!(
                "[dry-run] Would copy file: {} -> {}",
                src.display(),
                dest.display()
            ),
            Self::FileRemoved { path } => {
                format!("[dry-run] Would remove file: {}", path.display())
            }
            Self::DirectoryRemoved { path } => {
                format!("[dry-run] Would remove directory: {}", path.display())
            }
            failed => failed.to_string(),
        }
    }
}

impl fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryCreated { path } => {
                write!(f, "Created directory: {}", path.display())
            }
            Self::DirectoryCreateFailed { path, detail } => {
                write!(f, "Error creating directory {}: {}", path.display(), detail)
            }
            Self::FileCopied { src, dest } => {
                write!(f, "Copied file: {} -> {}", src.display(), dest.display())
            }
            Self::FileCopyFailed { src, dest, detail } => write!(
                f,
                "Error copying file {} to {}: {}",
                src.display(),
                dest.display(),
                detail
            ),
            Self::FileRemoved { path } => write!(f, "Removed file: {}", path.display()),
            Self::FileRemoveFailed { path, detail } => {
                write!(f, "Error removing file {}: {}", path.display(), detail)
            }
            Self::DirectoryRemoved { path } => {
                write!(f, "Removed directory: {}", path.display())
            }
            Self::DirectoryRemoveFailed { path, detail } => {
                write!(f, "Error removing directory {}: {}", path.display(), detail)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassPhase {
    Started,
    Finished,
}

/// Lines bracketing each pass of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEvent {
    /// 1-based pass number
    pub index: u64,
    pub total: u64,
    pub phase: PassPhase,
}

impl fmt::Display for ScheduleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self.phase {
            PassPhase::Started => "started",
            PassPhase::Finished => "finished",
        };
        write!(f, "--- Synchronization {}/{} {} ---", self.index, self.total, phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutation_messages() {
        let events = [
            SyncEvent::DirectoryCreated {
                path: "/r/sub".into(),
            },
            SyncEvent::FileCopied {
                src: "/s/a.txt".into(),
                dest: "/r/a.txt".into(),
            },
            SyncEvent::FileRemoved {
                path: "/r/extra.txt".into(),
            },
            SyncEvent::DirectoryRemoved {
                path: "/r/old".into(),
            },
        ];
        let rendered: Vec<String> = events.iter().map(ToString::to_string).collect();

        insta::assert_snapshot!(rendered.join("\n"), @r###"
        Created directory: /r/sub
        Copied file: /s/a.txt -> /r/a.txt
        Removed file: /r/extra.txt
        Removed directory: /r/old
        "###);
    }

    #[test]
    fn failure_messages() {
        let events = [
            SyncEvent::DirectoryCreateFailed {
                path: "/r/sub".into(),
                detail: "Permission denied".into(),
            },
            SyncEvent::FileCopyFailed {
                src: "/s/a.txt".into(),
                dest: "/r/a.txt".into(),
                detail: "No space left".into(),
            },
            SyncEvent::FileRemoveFailed {
                path: "/r/x".into(),
                detail: "busy".into(),
            },
            SyncEvent::DirectoryRemoveFailed {
                path: "/r/d".into(),
                detail: "busy".into(),
            },
        ];
        assert!(events.iter().all(SyncEvent::is_error));
        let rendered: Vec<String> = events.iter().map(ToString::to_string).collect();

        insta::assert_snapshot!(rendered.join("\n"), @r###"
        Error creating directory /r/sub: Permission denied
        Error copying file /s/a.txt to /r/a.txt: No space left
        Error removing file /r/x: busy
        Error removing directory /r/d: busy
        "###);
    }

    #[test]
    fn dry_run_messages_announce_intent() {
        let copy = SyncEvent::FileCopied {
            src: "/s/a".into(),
            dest: "/r/a".into(),
        };
        assert_eq!(copy.dry_run_message(), "[dry-run] Would copy file: /s/a -> /r/a");
        assert!(!copy.is_error());
    }

    #[test]
    fn schedule_brackets() {
        let started = ScheduleEvent {
            index: 1,
            total: 3,
            phase: PassPhase::Started,
        };
        let finished = ScheduleEvent {
            phase: PassPhase::Finished,
            ..started
        };
        assert_eq!(started.to_string(), "--- Synchronization 1/3 started ---");
        assert_eq!(finished.to_string(), "--- Synchronization 1/3 finished ---");
    }
}
