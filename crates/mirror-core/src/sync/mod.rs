//! Synchronization passes
//!
//! - [`SyncEngine::ensure_directories`]: create replica directories missing
//!   relative to the source
//! - [`SyncEngine::ensure_files`]: copy source files that are absent from the
//!   replica or whose content differs
//! - [`SyncEngine::prune_extraneous`]: remove replica entries with no source
//!   counterpart, deepest first
//! - [`SyncEngine::run_pass`]: all three, in that order

mod directories;
mod engine;
mod files;
mod prune;
mod report;

pub use engine::{SyncEngine, SyncOptions, run_pass};
pub use report::SyncReport;
