//! Ordered, lazy directory tree traversal.
//!
//! A [`TreeWalker`] is a description of a walk (root + order); every call to
//! [`TreeWalker::walk`] starts a fresh traversal, so walkers are restartable
//! and share no cursor state.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{Error, RelativePath};

/// Order in which a directory is yielded relative to its descendants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOrder {
    /// Directory before its contents; used when creating and copying.
    TopDown,
    /// Directory after its contents; used when pruning.
    BottomUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry below a walk root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub relative_path: RelativePath,
    pub kind: EntryKind,
}

impl TreeEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Walk description for a single root.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
    order: WalkOrder,
}

impl TreeWalker {
    pub fn new(root: impl Into<PathBuf>, order: WalkOrder) -> Self {
        Self {
            root: root.into(),
            order,
        }
    }

    pub fn top_down(root: impl Into<PathBuf>) -> Self {
        Self::new(root, WalkOrder::TopDown)
    }

    pub fn bottom_up(root: impl Into<PathBuf>) -> Self {
        Self::new(root, WalkOrder::BottomUp)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn order(&self) -> WalkOrder {
        self.order
    }

    /// Start a new traversal.
    ///
    /// The root itself is never yielded. A missing root produces an empty
    /// walk. Entries within one directory come out sorted by file name.
    pub fn walk(&self) -> Walk {
        let inner = match std::fs::symlink_metadata(&self.root) {
            Ok(_) => Some(
                WalkDir::new(&self.root)
                    .min_depth(1)
                    .follow_links(false)
                    .contents_first(self.order == WalkOrder::BottomUp)
                    .sort_by_file_name()
                    .into_iter(),
            ),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(root = %self.root.display(), error = %e, "cannot stat walk root");
                None
            }
        };

        Walk {
            root: self.root.clone(),
            inner,
            skipped: 0,
        }
    }
}

impl IntoIterator for &TreeWalker {
    type Item = TreeEntry;
    type IntoIter = Walk;

    fn into_iter(self) -> Walk {
        self.walk()
    }
}

/// An in-progress traversal.
///
/// Unreadable directories are skipped: they produce no entries for their
/// contents and bump [`Walk::skipped`] instead of ending the walk.
pub struct Walk {
    root: PathBuf,
    inner: Option<walkdir::IntoIter>,
    skipped: usize,
}

impl Walk {
    /// Number of traversal errors swallowed so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for Walk {
    type Item = TreeEntry;

    fn next(&mut self) -> Option<TreeEntry> {
        let inner = self.inner.as_mut()?;
        loop {
            match inner.next()? {
                Ok(entry) => {
                    let Some(relative_path) = RelativePath::from_root(&self.root, entry.path())
                    else {
                        continue;
                    };
                    let kind = if entry.file_type().is_dir() {
                        EntryKind::Directory
                    } else {
                        EntryKind::File
                    };
                    return Some(TreeEntry {
                        relative_path,
                        kind,
                    });
                }
                Err(e) => {
                    self.skipped += 1;
                    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| self.root.clone());
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("filesystem loop"));
                    let err = Error::traversal(path, source);
                    tracing::warn!(error = %err, "skipping unreadable entry");
                }
            }
        }
    }
}
