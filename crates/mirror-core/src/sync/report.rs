//! Per-step and per-pass outcome counters

use std::ops::AddAssign;

/// Outcome of one reconciler step or of a whole pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub directories_created: usize,
    pub files_copied: usize,
    /// Files whose fingerprints matched; nothing was written
    pub files_unchanged: usize,
    pub files_removed: usize,
    pub directories_removed: usize,
    /// Per-entry failures that were logged and skipped
    pub errors: usize,
    /// Walk errors: unreadable directories whose contents were not visited
    pub skipped_unreadable: usize,
}

impl SyncReport {
    /// Total entries created, copied or removed.
    pub fn mutations(&self) -> usize {
        self.directories_created + self.files_copied + self.files_removed + self.directories_removed
    }

    /// True when nothing changed and nothing failed.
    pub fn is_clean(&self) -> bool {
        self.mutations() == 0 && self.errors == 0
    }

    pub fn merge(&mut self, other: SyncReport) {
        *self += other;
    }
}

impl AddAssign for SyncReport {
    fn add_assign(&mut self, other: SyncReport) {
        self.directories_created += other.directories_created;
        self.files_copied += other.files_copied;
        self.files_unchanged += other.files_unchanged;
        self.files_removed += other.files_removed;
        self.directories_removed += other.directories_removed;
        self.errors += other.errors;
        self.skipped_unreadable += other.skipped_unreadable;
    }
}
