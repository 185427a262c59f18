//! Mutating filesystem operations
//!
//! Each operation touches exactly one entry and reports failure as a typed
//! [`Error`]; none of them log to the audit trail themselves.

use std::fs;
use std::path::Path;

use filetime::FileTime;

use crate::{Error, Result};

/// Create `path` and any missing parents.
pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::write(path, e))
}

/// Copy file content and permissions from `src` to `dest`, then carry over
/// access and modification times.
///
/// Overwrites `dest` if it exists. The copy is not atomic: a crash can leave a
/// truncated destination, which the next pass will detect by fingerprint.
///
/// Returns the number of bytes copied.
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64> {
    let meta = fs::metadata(src).map_err(|e| Error::read(src, e))?;
    if meta.is_dir() {
        return Err(Error::read(
            src,
            std::io::Error::other("source is a directory"),
        ));
    }

    let bytes = fs::copy(src, dest).map_err(|e| classify_copy_error(src, dest, e))?;

    let atime = FileTime::from_last_access_time(&meta);
    let mtime = FileTime::from_last_modification_time(&meta);
    if let Err(e) = filetime::set_file_times(dest, atime, mtime) {
        tracing::warn!(path = %dest.display(), error = %e, "could not preserve timestamps");
    }

    Ok(bytes)
}

/// Remove a single file.
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| Error::write(path, e))
}

/// Remove a directory together with anything still inside it.
pub fn remove_dir_all(path: &Path) -> Result<()> {
    fs::remove_dir_all(path).map_err(|e| Error::write(path, e))
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::read(path, e))
}

/// Attribute a failed `fs::copy` to whichever side caused it.
fn classify_copy_error(src: &Path, dest: &Path, e: std::io::Error) -> Error {
    match fs::File::open(src) {
        Err(_) => Error::read(src, e),
        Ok(_) => Error::write(dest, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_preserves_content_and_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.txt");
        let dest = dir.path().join("dest.txt");
        fs::write(&src, "payload").unwrap();
        let past = FileTime::from_unix_time(1_000_000_000, 0);
        filetime::set_file_mtime(&src, past).unwrap();

        let bytes = copy_file(&src, &dest).unwrap();

        assert_eq!(bytes, 7);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "payload");
        let dest_meta = fs::metadata(&dest).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&dest_meta), past);
    }

    #[test]
    fn copy_overwrites_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("new.txt");
        let dest = dir.path().join("old.txt");
        fs::write(&src, "new").unwrap();
        fs::write(&dest, "old content that is longer").unwrap();

        copy_file(&src, &dest).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }

    #[test]
    fn copy_from_missing_source_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_file(&dir.path().join("missing"), &dir.path().join("dest")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }), "got: {:?}", err);
    }

    #[test]
    fn copy_into_missing_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.txt");
        fs::write(&src, "x").unwrap();

        let err = copy_file(&src, &dir.path().join("no/such/dir/dest.txt")).unwrap_err();
        assert!(matches!(err, Error::Write { .. }), "got: {:?}", err);
    }

    #[test]
    fn remove_dir_all_removes_nested_content() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("old");
        fs::create_dir_all(target.join("deep")).unwrap();
        fs::write(target.join("deep/x.txt"), "x").unwrap();

        remove_dir_all(&target).unwrap();

        assert!(!target.exists());
    }
}
