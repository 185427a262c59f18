//! Prune reconciler: remove replica entries the source does not have
//!
//! The replica is walked bottom-up so each orphaned file is removed, and
//! logged, before the directory holding it is considered.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use mirror_fs::{EntryKind, TreeEntry, TreeWalker, ops};

use crate::event::SyncEvent;
use crate::log::LogSink;
use crate::Result;

use super::engine::{SyncEngine, failure_detail};
use super::report::SyncReport;

/// What the source holds at a replica entry's relative path.
#[derive(Debug, PartialEq, Eq)]
enum Counterpart {
    Present(EntryKind),
    Absent,
    /// The source path could not be inspected; the replica entry is kept.
    Unknown,
}

fn counterpart(path: &Path) -> Counterpart {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => Counterpart::Present(EntryKind::Directory),
        Ok(_) => Counterpart::Present(EntryKind::File),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            Counterpart::Absent
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot inspect source entry; keeping replica copy");
            Counterpart::Unknown
        }
    }
}

fn is_orphan(entry: &TreeEntry, source_side: &Counterpart) -> bool {
    match source_side {
        Counterpart::Present(kind) => *kind != entry.kind,
        Counterpart::Absent => true,
        Counterpart::Unknown => false,
    }
}

pub(super) fn prune_extraneous(engine: &SyncEngine, sink: &mut dyn LogSink) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    let walker = TreeWalker::bottom_up(engine.replica());
    let mut walk = walker.walk();
    for entry in walk.by_ref() {
        let source_path = entry.relative_path.resolve(engine.source());
        if !is_orphan(&entry, &counterpart(&source_path)) {
            continue;
        }

        let path = entry.relative_path.resolve(engine.replica());
        let event = match entry.kind {
            EntryKind::File => remove_file(engine, path, &mut report),
            EntryKind::Directory => remove_dir(engine, path, &mut report),
        };
        engine.record(sink, &event)?;
    }
    report.skipped_unreadable += walk.skipped();

    Ok(report)
}

fn remove_file(engine: &SyncEngine, path: std::path::PathBuf, report: &mut SyncReport) -> SyncEvent {
    if engine.options().dry_run {
        report.files_removed += 1;
        return SyncEvent::FileRemoved { path };
    }
    match ops::remove_file(&path) {
        Ok(()) => {
            report.files_removed += 1;
            SyncEvent::FileRemoved { path }
        }
        Err(e) => {
            report.errors += 1;
            SyncEvent::FileRemoveFailed {
                detail: failure_detail(&e),
                path,
            }
        }
    }
}

fn remove_dir(engine: &SyncEngine, path: std::path::PathBuf, report: &mut SyncReport) -> SyncEvent {
    if engine.options().dry_run {
        report.directories_removed += 1;
        return SyncEvent::DirectoryRemoved { path };
    }
    match ops::remove_dir_all(&path) {
        Ok(()) => {
            report.directories_removed += 1;
            SyncEvent::DirectoryRemoved { path }
        }
        Err(e) => {
            report.errors += 1;
            SyncEvent::DirectoryRemoveFailed {
                detail: failure_detail(&e),
                path,
            }
        }
    }
}
