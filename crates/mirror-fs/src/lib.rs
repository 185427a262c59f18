//! Filesystem primitives for folder-mirror
//!
//! Provides content fingerprinting, ordered tree walking, root-relative path
//! mapping and the mutating operations the reconcilers are built from.

pub mod checksum;
pub mod config;
pub mod error;
pub mod ops;
pub mod path;
pub mod walk;

pub use checksum::{Fingerprint, fingerprint};
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::RelativePath;
pub use walk::{EntryKind, TreeEntry, TreeWalker, WalkOrder};
