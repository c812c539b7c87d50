//! Plain-text setup log under `~/.claude-code-logs`.
//!
//! Each record is one line appended to both `setup-<YYYY-MM-DD>.log` and
//! `setup-latest.log`. The latest file is appended to like the dated one and
//! therefore accumulates every run.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::Result;

/// Directory name under the user's home.
pub const LOG_DIR_NAME: &str = ".claude-code-logs";

/// File that receives every record regardless of date.
pub const LATEST_LOG_NAME: &str = "setup-latest.log";

/// Append-only log sink for setup runs.
#[derive(Debug, Clone)]
pub struct SetupLog {
    dir: PathBuf,
}

impl SetupLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<home>/.claude-code-logs`
    pub fn in_home(home: &Path) -> Self {
        Self::new(home.join(LOG_DIR_NAME))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Dated log file for the UTC day of `now`.
    pub fn daily_path(&self, now: DateTime<Utc>) -> PathBuf {
        self.dir.join(format!("setup-{}.log", now.format("%Y-%m-%d")))
    }

    pub fn latest_path(&self) -> PathBuf {
        self.dir.join(LATEST_LOG_NAME)
    }

    pub fn record(&self, message: &str) -> Result<()> {
        self.record_at(Utc::now(), message, false)
    }

    pub fn record_error(&self, message: &str) -> Result<()> {
        self.record_at(Utc::now(), message, true)
    }

    /// Append one record stamped with `now`.
    pub fn record_at(&self, now: DateTime<Utc>, message: &str, is_error: bool) -> Result<()> {
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(|e| mdmcp_fs::Error::io(&self.dir, e))?;
        }
        let line = format_entry(now, message, is_error);
        mdmcp_fs::io::append_line(&self.daily_path(now), &line)?;
        mdmcp_fs::io::append_line(&self.latest_path(), &line)?;
        Ok(())
    }
}

/// `[2024-05-01T12:00:00.000Z] ERROR: message\n`
pub fn format_entry(now: DateTime<Utc>, message: &str, is_error: bool) -> String {
    format!(
        "[{}] {}{}\n",
        now.to_rfc3339_opts(SecondsFormat::Millis, true),
        if is_error { "ERROR: " } else { "" },
        message
    )
}

/// Record `message` and discard any failure.
///
/// Logging must not abort setup. When an error record itself cannot be
/// written, the reason goes to stderr.
pub fn log_best_effort(log: &SetupLog, message: &str, is_error: bool) {
    let result = if is_error {
        log.record_error(message)
    } else {
        log.record(message)
    };
    if let Err(e) = result {
        tracing::debug!(error = %e, dir = %log.dir().display(), "setup log write failed");
        if is_error {
            eprintln!("[Log Error] {e}");
        }
    }
}
