//! Run parameters
//!
//! Parameters may be assembled from a config file and command-line values;
//! [`PartialRunConfig`] holds either source and [`RunConfig`] is the validated
//! result.

use std::path::{Path, PathBuf};
use std::time::Duration;

use mirror_fs::ConfigStore;
use serde::Deserialize;

use crate::schedule::Schedule;
use crate::{Error, Result};

const DEFAULT_INTERVAL_SECONDS: u64 = 0;
const DEFAULT_COUNT: u64 = 1;

/// Run parameters with every field optional, as read from one origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialRunConfig {
    pub source: Option<PathBuf>,
    pub replica: Option<PathBuf>,
    pub interval_seconds: Option<u64>,
    pub count: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl PartialRunConfig {
    /// Load from a `.toml`, `.json`, `.yaml` or `.yml` file.
    ///
    /// Relative paths in the file are taken relative to the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let mut partial: Self = ConfigStore::new().load(path)?;
        if let Some(base) = path.parent() {
            for field in [&mut partial.source, &mut partial.replica, &mut partial.log_file] {
                if let Some(p) = field.as_mut()
                    && p.is_relative()
                {
                    *p = base.join(&*p);
                }
            }
        }
        Ok(partial)
    }

    /// Combine with `overrides`, whose set fields win.
    pub fn merge(self, overrides: PartialRunConfig) -> Self {
        Self {
            source: overrides.source.or(self.source),
            replica: overrides.replica.or(self.replica),
            interval_seconds: overrides.interval_seconds.or(self.interval_seconds),
            count: overrides.count.or(self.count),
            log_file: overrides.log_file.or(self.log_file),
        }
    }

    /// Fill defaults and require the mandatory fields.
    pub fn resolve(self) -> Result<RunConfig> {
        let missing = |name: &str| Error::invalid_config(format!("missing required parameter `{}`", name));
        Ok(RunConfig {
            source: self.source.ok_or_else(|| missing("source"))?,
            replica: self.replica.ok_or_else(|| missing("replica"))?,
            interval_seconds: self.interval_seconds.unwrap_or(DEFAULT_INTERVAL_SECONDS),
            count: self.count.unwrap_or(DEFAULT_COUNT),
            log_file: self.log_file.ok_or_else(|| missing("log_file"))?,
        })
    }
}

/// Complete run parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub source: PathBuf,
    pub replica: PathBuf,
    pub interval_seconds: u64,
    pub count: u64,
    pub log_file: PathBuf,
}

impl RunConfig {
    pub fn schedule(&self) -> Schedule {
        Schedule::new(self.count, Duration::from_secs(self.interval_seconds))
    }

    /// Reject parameters that would make mirroring unsafe or meaningless.
    ///
    /// - the source must be an existing directory
    /// - source and replica must be distinct and not nested in each other
    /// - the log file must not live inside the replica, where pruning would
    ///   delete it
    pub fn validate(&self) -> Result<()> {
        if !self.source.is_dir() {
            return Err(Error::invalid_config(format!(
                "source {} is not an existing directory",
                self.source.display()
            )));
        }

        let source = resolve_path(&self.source)?;
        let replica = resolve_path(&self.replica)?;

        if source == replica {
            return Err(Error::invalid_config(format!(
                "source and replica are the same directory: {}",
                source.display()
            )));
        }
        if replica.starts_with(&source) {
            return Err(Error::invalid_config(format!(
                "replica {} is inside source {}",
                replica.display(),
                source.display()
            )));
        }
        if source.starts_with(&replica) {
            return Err(Error::invalid_config(format!(
                "source {} is inside replica {}",
                source.display(),
                replica.display()
            )));
        }

        let log_file = resolve_path(&self.log_file)?;
        if log_file.starts_with(&replica) {
            return Err(Error::invalid_config(format!(
                "log file {} is inside replica {} and would be pruned",
                log_file.display(),
                replica.display()
            )));
        }

        Ok(())
    }
}

/// Canonical form of `path`, resolving through its deepest existing ancestor
/// when the path itself does not exist yet.
fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| mirror_fs::Error::read(path, e))?;

    let mut existing = absolute.as_path();
    let mut tail = Vec::new();
    loop {
        if let Ok(canonical) = dunce::canonicalize(existing) {
            return Ok(tail.iter().rev().fold(canonical, |acc, seg| acc.join(seg)));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(absolute),
        }
    }
}
