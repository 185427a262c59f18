//! Root-relative paths
//!
//! An entry in the source tree and an entry in the replica tree are "the same
//! entry" when their paths relative to their respective roots are equal.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A path relative to a tree root.
///
/// The empty relative path denotes the root itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath {
    inner: PathBuf,
}

impl RelativePath {
    /// The root of a tree.
    pub fn root() -> Self {
        Self {
            inner: PathBuf::new(),
        }
    }

    /// Derive the relative form of `path` under `root`.
    ///
    /// Returns `None` when `path` is not located under `root`.
    pub fn from_root(root: &Path, path: &Path) -> Option<Self> {
        let rel = path.strip_prefix(root).ok()?;
        Self::new(rel)
    }

    /// Build a relative path from segments, dropping `.` components.
    ///
    /// Returns `None` if `path` is absolute or contains `..`; such a value
    /// would escape the root it is later resolved against.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let mut inner = PathBuf::new();
        for component in path.as_ref().components() {
            match component {
                Component::Normal(seg) => inner.push(seg),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        Some(Self { inner })
    }

    /// Map this entry onto a concrete tree root.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        if self.is_root() {
            root.to_path_buf()
        } else {
            root.join(&self.inner)
        }
    }

    pub fn is_root(&self) -> bool {
        self.inner.as_os_str().is_empty()
    }

    /// Number of segments below the root.
    pub fn depth(&self) -> usize {
        self.inner.components().count()
    }

    pub fn as_path(&self) -> &Path {
        &self.inner
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str(".")
        } else {
            write!(f, "{}", self.inner.display())
        }
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.inner
    }
}
