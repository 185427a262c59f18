//! Audit log sinks
//!
//! The synchronization core only ever appends message bodies; the sink owns
//! timestamps, buffering and the destination.

use std::fs::{File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::Path;

use chrono::{DateTime, Local};
use fs2::FileExt;

use crate::{Error, Result};

/// Timestamp prefix format, e.g. `[2024-05-01 13:07:42]`
pub const TIMESTAMP_FORMAT: &str = "[%Y-%m-%d %H:%M:%S]";

/// Append-only, line-oriented audit log.
pub trait LogSink {
    /// Append one message body as a complete line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LogSink`] when the line cannot be recorded. Callers
    /// treat this as fatal.
    fn append(&mut self, message: &str) -> Result<()>;
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn append(&mut self, message: &str) -> Result<()> {
        (**self).append(message)
    }
}

/// Render a full log line for `message` at `time`.
pub fn format_line(time: DateTime<Local>, message: &str) -> String {
    format!("{} {}", time.format(TIMESTAMP_FORMAT), message)
}

/// Sink that prefixes each line with the local time and flushes it
/// immediately, optionally echoing it to a second writer (stdout by default).
///
/// The echo is best effort: the line reaches `writer` first, and an echo
/// failure such as a closed stdout pipe only turns the echo off.
#[derive(Debug)]
pub struct TimestampedSink<W: Write, E: Write = io::Stdout> {
    writer: W,
    echo: Option<E>,
}

impl<W: Write> TimestampedSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, echo: None }
    }

    /// Also print every line to stdout.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo.then(io::stdout);
        self
    }
}

impl<W: Write, E: Write> TimestampedSink<W, E> {
    /// Echo every line to `echo` instead of stdout.
    pub fn echo_to<E2: Write>(self, echo: E2) -> TimestampedSink<W, E2> {
        TimestampedSink {
            writer: self.writer,
            echo: Some(echo),
        }
    }

    pub fn is_echoing(&self) -> bool {
        self.echo.is_some()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write, E: Write> LogSink for TimestampedSink<W, E> {
    fn append(&mut self, message: &str) -> Result<()> {
        let line = format_line(Local::now(), message);
        writeln!(self.writer, "{}", line)
            .and_then(|()| self.writer.flush())
            .map_err(|source| Error::LogSink { source })?;

        let echoed = match self.echo.as_mut() {
            Some(echo) => writeln!(echo, "{}", line).and_then(|()| echo.flush()),
            None => Ok(()),
        };
        if let Err(e) = echoed {
            tracing::warn!(error = %e, "cannot echo audit log; continuing with the log file only");
            self.echo = None;
        }
        Ok(())
    }
}

/// Open `path` for appending and take an exclusive advisory lock on it.
///
/// The file is created if missing; its parent directory must exist. The lock
/// is held until the returned sink is dropped.
pub fn open_log_file(path: &Path) -> Result<TimestampedSink<File>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::LogFileOpen {
            path: path.to_path_buf(),
            source,
        })?;

    file.try_lock_exclusive().map_err(|source| lock_error(path, source))?;

    tracing::debug!(path = %path.display(), "audit log opened");
    Ok(TimestampedSink::new(file))
}

/// Only contention means another run holds the file; anything else (e.g. a
/// filesystem without lock support) is an open failure.
fn lock_error(path: &Path, source: io::Error) -> Error {
    let contended = source.kind() == ErrorKind::WouldBlock
        || (source.raw_os_error().is_some()
            && source.raw_os_error() == fs2::lock_contended_error().raw_os_error());
    if contended {
        Error::LogFileLocked {
            path: path.to_path_buf(),
        }
    } else {
        Error::LogFileOpen {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Sink that keeps message bodies in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines starting with `prefix`.
    pub fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        self.lines.iter().filter(move |l| l.starts_with(prefix))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl LogSink for MemorySink {
    fn append(&mut self, message: &str) -> Result<()> {
        self.lines.push(message.to_string());
        Ok(())
    }
}
