//! SHA-256 content fingerprints
//!
//! Two files are considered equal iff their fingerprints are equal. Fingerprints
//! are computed from the full byte contents, never from size or timestamps.

use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::{Error, Result};

/// Prefix used when a fingerprint is rendered as text
const PREFIX: &str = "sha256:";

/// Bytes read per chunk while hashing
const CHUNK_SIZE: usize = 8 * 1024;

/// Digest of a file's full contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint of an in-memory buffer.
    pub fn of_bytes(content: &[u8]) -> Self {
        Self(Sha256::digest(content).into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(PREFIX)?;
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Stream a file through SHA-256 in fixed-size chunks.
///
/// # Errors
///
/// Returns [`Error::Read`] if the file cannot be opened or read to the end.
pub fn compute_file_checksum(path: &Path) -> Result<Fingerprint> {
    let mut file = File::open(path).map_err(|e| Error::read(path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buf[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::read(path, e)),
        }
    }

    Ok(Fingerprint(hasher.finalize().into()))
}

/// Fingerprint a file, or `None` when it cannot be read.
///
/// `None` means "unknown": callers must not treat it as equal to anything,
/// including another `None`.
pub fn fingerprint(path: &Path) -> Option<Fingerprint> {
    match compute_file_checksum(path) {
        Ok(fp) => Some(fp),
        Err(e) => {
            tracing::debug!(error = %e, "fingerprint unavailable");
            None
        }
    }
}

/// Whether two fingerprints prove the files hold identical content.
pub fn same_content(a: Option<Fingerprint>, b: Option<Fingerprint>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}
