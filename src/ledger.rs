//! Append-only operation log plus the last-installed marker.
//!
//! The log is free-text lines for the operator; the marker is a single
//! identifier consulted for the idempotence check. They are deliberately
//! separate files so a noisy log never corrupts the marker.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use time::OffsetDateTime;
use time::format_description::FormatItem;

use crate::error::UpdateError;

const LOG_FILE: &str = "paper.log";
const MARKER_FILE: &str = "version.txt";

#[derive(Clone, Debug)]
pub struct InstallLedger {
    log_path: PathBuf,
    marker_path: PathBuf,
}

impl InstallLedger {
    /// Creates `logs_dir` if absent. Failure here is a startup
    /// precondition, not a recoverable workflow error.
    pub fn open(logs_dir: &Path) -> Result<Self, UpdateError> {
        fs::create_dir_all(logs_dir).map_err(|source| UpdateError::Io {
            context: format!("create logs directory {}", logs_dir.display()),
            source,
        })?;
        Ok(Self {
            log_path: logs_dir.join(LOG_FILE),
            marker_path: logs_dir.join(MARKER_FILE),
        })
    }

    pub fn marker_path(&self) -> &Path {
        &self.marker_path
    }

    /// Appends one timestamped line and releases the handle before
    /// returning. No locking: single-instance usage is assumed.
    pub fn append(&self, message: &str) -> Result<(), UpdateError> {
        let ts = OffsetDateTime::now_utc()
            .format(log_ts_format())
            .unwrap_or_default();
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|source| UpdateError::Io {
                context: format!("open {}", self.log_path.display()),
                source,
            })?;
        writeln!(f, "[{ts}] {message}").map_err(|source| UpdateError::Io {
            context: format!("append to {}", self.log_path.display()),
            source,
        })?;
        Ok(())
    }

    /// The stored marker, or an empty string if nothing was ever
    /// installed. A missing marker file is not an error; other read
    /// failures propagate.
    pub fn last_installed(&self) -> Result<String, UpdateError> {
        match fs::read_to_string(&self.marker_path) {
            Ok(s) => Ok(s.trim().to_string()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(source) => Err(UpdateError::Io {
                context: format!("read {}", self.marker_path.display()),
                source,
            }),
        }
    }

    /// Overwrites the marker. Call only after a download is verified
    /// complete; the happens-after ordering is the caller's contract.
    pub fn save_installed(&self, identifier: &str) -> Result<(), UpdateError> {
        write_atomic(&self.marker_path, identifier.as_bytes()).map_err(UpdateError::Persist)
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}

fn log_ts_format() -> &'static [FormatItem<'static>] {
    static FMT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")
            .expect("valid time format")
    })
}
