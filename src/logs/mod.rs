//! Append-only event log files
//!
//! Three destinations — informational, warning, error — kept as separate
//! files (`log_info.log`, `log_warn.log`, `log_err.log`). They are opened
//! once at startup in append mode and never rotated or reopened. The handle
//! set is an explicit value injected into the session rather than a set of
//! process-wide globals.
//!
//! These files are the user-auditable trail; developer diagnostics go
//! through `tracing` instead.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;

use crate::error::CutResult;

const LINE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Handle set for the three append-only log destinations.
pub struct EventLog {
    info: Mutex<File>,
    warn: Mutex<File>,
    error: Mutex<File>,
}

impl EventLog {
    /// Open the three destinations under `dir`, creating missing files.
    pub fn open(dir: &Path) -> CutResult<Self> {
        Ok(Self {
            info: Mutex::new(Self::append_file(dir, "log_info.log")?),
            warn: Mutex::new(Self::append_file(dir, "log_warn.log")?),
            error: Mutex::new(Self::append_file(dir, "log_err.log")?),
        })
    }

    fn append_file(dir: &Path, name: &str) -> std::io::Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(name))
    }

    /// Append a timestamped line to the informational stream.
    pub fn info(&self, message: &str) {
        Self::write_line(&self.info, "INFO", message);
    }

    /// Append a timestamped line to the warning stream.
    pub fn warn(&self, message: &str) {
        Self::write_line(&self.warn, "WARN", message);
    }

    /// Append a timestamped line to the error stream.
    pub fn error(&self, message: &str) {
        Self::write_line(&self.error, "ERROR", message);
    }

    // A failed log write must never abort the cut itself.
    fn write_line(dest: &Mutex<File>, level: &str, message: &str) {
        let line = format!(
            "{} {}:\t{}\n",
            Local::now().format(LINE_TIMESTAMP_FORMAT),
            level,
            message
        );
        if let Ok(mut file) = dest.lock() {
            let _ = file.write_all(line.as_bytes());
        }
    }
}
