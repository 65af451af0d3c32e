//! Append-only run log.
//!
//! One line per record: `<rfc3339 timestamp> <LEVEL> <message>`. Every record
//! is mirrored to `tracing` so console output and the file agree.

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Severity of a run log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Error => "ERROR",
        }
    }
}

/// Run log shared by every stage of a run.
pub struct RunLog {
    file: File,
    path: PathBuf,
}

impl RunLog {
    /// Open or create the log file in append mode.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open run log: {}", path.display()))?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn info(&mut self, message: &str) {
        tracing::info!("{message}");
        self.record(Level::Info, message);
    }

    pub fn error(&mut self, message: &str) {
        tracing::error!("{message}");
        self.record(Level::Error, message);
    }

    fn record(&mut self, level: Level, message: &str) {
        let line = format!("{} {} {message}", Utc::now().to_rfc3339(), level.as_str());
        // A failed log write must not abort the run.
        if let Err(e) = writeln!(self.file, "{line}") {
            tracing::warn!("failed to write run log {}: {e}", self.path.display());
        }
    }
}
