//! Directory reconciler: create what the source has and the replica lacks

use mirror_fs::{RelativePath, TreeWalker, ops};

use crate::event::SyncEvent;
use crate::log::LogSink;
use crate::Result;

use super::engine::{SyncEngine, failure_detail};
use super::report::SyncReport;

pub(super) fn ensure_directories(engine: &SyncEngine, sink: &mut dyn LogSink) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    if !engine.source().is_dir() {
        tracing::debug!(source = %engine.source().display(), "source is not a directory; nothing to create");
        return Ok(report);
    }

    ensure_one(engine, &RelativePath::root(), sink, &mut report)?;

    let walker = TreeWalker::top_down(engine.source());
    let mut walk = walker.walk();
    for entry in walk.by_ref() {
        if entry.is_dir() {
            ensure_one(engine, &entry.relative_path, sink, &mut report)?;
        }
    }
    report.skipped_unreadable += walk.skipped();

    Ok(report)
}

fn ensure_one(
    engine: &SyncEngine,
    rel: &RelativePath,
    sink: &mut dyn LogSink,
    report: &mut SyncReport,
) -> Result<()> {
    let target = rel.resolve(engine.replica());
    // A file in the way is not skipped: the failed creation gets logged and
    // pruning clears the file for the next pass.
    if target.is_dir() {
        return Ok(());
    }

    if engine.options().dry_run {
        report.directories_created += 1;
        return engine.record(sink, &SyncEvent::DirectoryCreated { path: target });
    }

    let event = match ops::create_dir_all(&target) {
        Ok(()) => {
            report.directories_created += 1;
            SyncEvent::DirectoryCreated { path: target }
        }
        Err(e) => {
            report.errors += 1;
            SyncEvent::DirectoryCreateFailed {
                detail: failure_detail(&e),
                path: target,
            }
        }
    };
    engine.record(sink, &event)
}
