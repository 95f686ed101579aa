use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Classified failures surfaced to the active view. None of these should
/// terminate the process; the view renders them and offers retry/back/quit.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// Network, HTTP, or JSON-decode failure from the release API.
    #[error("release API request failed: {0}")]
    Transport(String),

    #[error("release API returned status {status} for {url}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    /// No version has a default-channel build. Terminal for this
    /// resolution attempt; the caller may retry.
    #[error("no version with default-channel builds found")]
    NoStableBuildFound,

    #[error("version {version} has no builds")]
    NoBuilds { version: String },

    /// Renaming the existing artifact aside failed. The workflow returns
    /// to its resting state without attempting the download.
    #[error("failed to back up {path}: {source}")]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The download itself completed; recording it did not.
    #[error("downloaded build could not be recorded: {0}")]
    Persist(#[source] io::Error),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl From<reqwest::Error> for UpdateError {
    fn from(err: reqwest::Error) -> Self {
        UpdateError::Transport(err.to_string())
    }
}
