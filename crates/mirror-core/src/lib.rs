//! One-way directory mirroring
//!
//! After each pass the replica tree holds exactly the directories and files of
//! the source tree, with file equality decided by content fingerprint.
//!
//! A pass runs three reconcilers in a fixed order:
//!
//! ```text
//!   source --top-down--> ensure_directories --> ensure_files
//!   replica --bottom-up--> prune_extraneous
//! ```
//!
//! Every mutation, and every per-entry failure, is reported as one message
//! body to an injected [`LogSink`]. Per-entry failures never abort a pass; only
//! a failing sink does.
//!
//! # Example
//!
//! ```no_run
//! use mirror_core::{MemorySink, SyncEngine};
//!
//! let engine = SyncEngine::new("/data/source", "/data/replica");
//! let mut sink = MemorySink::new();
//! let report = engine.run_pass(&mut sink)?;
//! println!("{} files copied", report.files_copied);
//! # Ok::<(), mirror_core::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod log;
pub mod schedule;
pub mod sync;

pub use config::{PartialRunConfig, RunConfig};
pub use error::{Error, Result};
pub use event::{PassPhase, ScheduleEvent, SyncEvent};
pub use log::{LogSink, MemorySink, TimestampedSink, open_log_file};
pub use schedule::{Schedule, run_schedule};
pub use sync::{SyncEngine, SyncOptions, SyncReport, run_pass};
