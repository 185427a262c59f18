//! File reconciler: copy files that are absent or whose content differs

use mirror_fs::checksum::{fingerprint, same_content};
use mirror_fs::{TreeWalker, ops};

use crate::event::SyncEvent;
use crate::log::LogSink;
use crate::Result;

use super::engine::SyncEngine;
use super::report::SyncReport;

pub(super) fn ensure_files(engine: &SyncEngine, sink: &mut dyn LogSink) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    let walker = TreeWalker::top_down(engine.source());
    let mut walk = walker.walk();
    for entry in walk.by_ref() {
        if entry.is_dir() {
            continue;
        }

        let src = entry.relative_path.resolve(engine.source());
        let dest = entry.relative_path.resolve(engine.replica());

        // An unreadable side yields no fingerprint and therefore a copy
        // attempt; a failing copy is logged below.
        if dest.exists() && same_content(fingerprint(&src), fingerprint(&dest)) {
            tracing::debug!(path = %entry.relative_path, "unchanged");
            report.files_unchanged += 1;
            continue;
        }

        if engine.options().dry_run {
            report.files_copied += 1;
            engine.record(sink, &SyncEvent::FileCopied { src, dest })?;
            continue;
        }

        let event = match ops::copy_file(&src, &dest) {
            Ok(bytes) => {
                tracing::trace!(path = %entry.relative_path, bytes, "copied");
                report.files_copied += 1;
                SyncEvent::FileCopied { src, dest }
            }
            Err(e) => {
                report.errors += 1;
                SyncEvent::FileCopyFailed {
                    src,
                    dest,
                    detail: e.to_string(),
                }
            }
        };
        engine.record(sink, &event)?;
    }
    report.skipped_unreadable += walk.skipped();

    Ok(report)
}
