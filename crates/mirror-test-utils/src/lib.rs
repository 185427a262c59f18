//! Shared test utilities for the folder-mirror workspace.
//!
//! - [`MirrorFixture`]: a temporary source/replica pair plus a log path
//! - [`tree_snapshot`]: a comparable picture of a directory tree
//! - [`is_root`]: permission tests skip themselves when this is true

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// One entry of a [`tree_snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Dir,
    File(Vec<u8>),
}

/// Temporary `source/` and `replica/` directories side by side.
///
/// Both directories exist after construction. Everything is deleted when the
/// fixture is dropped.
pub struct MirrorFixture {
    temp: TempDir,
    pub source: PathBuf,
    pub replica: PathBuf,
}

impl MirrorFixture {
    /// # Panics
    /// Panics if the temporary directories cannot be created.
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap_or_else(|e| panic!("MirrorFixture: tempdir failed: {e}"));
        let source = temp.path().join("source");
        let replica = temp.path().join("replica");
        fs::create_dir(&source).unwrap_or_else(|e| panic!("MirrorFixture: mkdir source: {e}"));
        fs::create_dir(&replica).unwrap_or_else(|e| panic!("MirrorFixture: mkdir replica: {e}"));
        Self {
            temp,
            source,
            replica,
        }
    }

    /// Directory holding both trees; a good place for log files.
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn log_path(&self) -> PathBuf {
        self.temp.path().join("mirror.log")
    }

    /// Write `content` at `rel` under the source, creating parents.
    pub fn source_file(&self, rel: &str, content: impl AsRef<[u8]>) -> PathBuf {
        write_file(&self.source, rel, content.as_ref())
    }

    /// Write `content` at `rel` under the replica, creating parents.
    pub fn replica_file(&self, rel: &str, content: impl AsRef<[u8]>) -> PathBuf {
        write_file(&self.replica, rel, content.as_ref())
    }

    pub fn source_dir(&self, rel: &str) -> PathBuf {
        make_dir(&self.source, rel)
    }

    pub fn replica_dir(&self, rel: &str) -> PathBuf {
        make_dir(&self.replica, rel)
    }

    pub fn read_replica(&self, rel: &str) -> String {
        fs::read_to_string(self.replica.join(rel))
            .unwrap_or_else(|e| panic!("read_replica {rel}: {e}"))
    }
}

impl Default for MirrorFixture {
    fn default() -> Self {
        Self::new()
    }
}

fn write_file(root: &Path, rel: &str, content: &[u8]) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap_or_else(|e| panic!("mkdir {}: {e}", parent.display()));
    }
    fs::write(&path, content).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
    path
}

fn make_dir(root: &Path, rel: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(&path).unwrap_or_else(|e| panic!("mkdir {}: {e}", path.display()));
    path
}

/// Every entry under `root`, keyed by `/`-separated relative path.
///
/// A missing root yields an empty map.
///
/// # Panics
/// Panics if a directory or file under `root` cannot be read.
pub fn tree_snapshot(root: &Path) -> BTreeMap<String, Node> {
    let mut out = BTreeMap::new();
    if root.is_dir() {
        collect(root, "", &mut out);
    }
    out
}

fn collect(dir: &Path, prefix: &str, out: &mut BTreeMap<String, Node>) {
    let entries = fs::read_dir(dir).unwrap_or_else(|e| panic!("read_dir {}: {e}", dir.display()));
    for entry in entries {
        let entry = entry.unwrap_or_else(|e| panic!("dir entry in {}: {e}", dir.display()));
        let name = entry.file_name().to_string_lossy().into_owned();
        let key = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };
        let path = entry.path();
        if path.is_dir() {
            out.insert(key.clone(), Node::Dir);
            collect(&path, &key, out);
        } else {
            let bytes = fs::read(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()));
            out.insert(key, Node::File(bytes));
        }
    }
}

/// Whether the tests run as root, which bypasses permission checks.
pub fn is_root() -> bool {
    match std::process::Command::new("id").arg("-u").output() {
        Ok(output) => String::from_utf8_lossy(&output.stdout).trim() == "0",
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_lists_nested_entries() {
        let fixture = MirrorFixture::new();
        fixture.source_file("a/b.txt", "b");
        fixture.source_dir("empty");

        let snap = tree_snapshot(&fixture.source);

        assert_eq!(snap.len(), 3);
        assert_eq!(snap["a"], Node::Dir);
        assert_eq!(snap["a/b.txt"], Node::File(b"b".to_vec()));
        assert_eq!(snap["empty"], Node::Dir);
    }

    #[test]
    fn snapshot_of_missing_root_is_empty() {
        let fixture = MirrorFixture::new();
        assert!(tree_snapshot(&fixture.root().join("nope")).is_empty());
    }
}
