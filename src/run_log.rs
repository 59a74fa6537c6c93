//! Per-run action log.
//!
//! Every invocation writes one plain-text log file under `<target>/logs/`,
//! named with the start timestamp. Each recorded event becomes one
//! timestamped line; the format is human-readable only.

use crate::organizer::{OrganizeError, OrganizeResult};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Name of the log folder created under the target directory.
pub const LOG_DIR_NAME: &str = "logs";

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Append-only log for one organization run.
pub struct RunLog {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl RunLog {
    /// Creates `<base>/logs/` if needed and opens a fresh log file named
    /// `file_organizer_YYYYMMDD_HHMMSS.log` for this run.
    pub fn create(base_path: &Path) -> OrganizeResult<Self> {
        let log_dir = base_path.join(LOG_DIR_NAME);
        fs::create_dir_all(&log_dir).map_err(|e| OrganizeError::LogSetupFailed {
            path: log_dir.clone(),
            source: e,
        })?;

        let file_name = format!(
            "file_organizer_{}.log",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        );
        let path = log_dir.join(file_name);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| OrganizeError::LogSetupFailed {
                path: path.clone(),
                source: e,
            })?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
        })
    }

    /// Records an informational event.
    pub fn info(&mut self, message: &str) -> OrganizeResult<()> {
        self.append(LogLevel::Info, message)
    }

    /// Records an error event.
    pub fn error(&mut self, message: &str) -> OrganizeResult<()> {
        self.append(LogLevel::Error, message)
    }

    /// Appends one timestamped line and flushes it to disk.
    fn append(&mut self, level: LogLevel, message: &str) -> OrganizeResult<()> {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(self.writer, "{} - {} - {}", timestamp, level.as_str(), message)
            .and_then(|_| self.writer.flush())
            .map_err(|e| OrganizeError::LogSetupFailed {
                path: self.path.clone(),
                source: e,
            })
    }

    /// Path of the log file for this run.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
