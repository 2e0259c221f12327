//! Error types returned by the log writer.
//!
//! Every variant carries the path it failed on so a direct caller can report
//! something useful. The hook binary never shows these to its host; it only
//! traces them before acknowledging.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias for writer operations.
pub type LogResult<T> = Result<T, LogError>;

#[derive(Debug, Error)]
pub enum LogError {
    /// The log directory (or one of its parents) could not be created.
    #[error("failed to create log directory '{}'", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The date-partitioned log file could not be opened for append.
    #[error("failed to open log file '{}'", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The record line could not be appended to an opened file.
    #[error("failed to append to log file '{}'", path.display())]
    Append {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize log record")]
    Serialize(#[from] serde_json::Error),
}

impl LogError {
    /// Path involved in the failure, when there is one.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            LogError::CreateDir { path, .. }
            | LogError::Open { path, .. }
            | LogError::Append { path, .. } => Some(path),
            LogError::Serialize(_) => None,
        }
    }
}
