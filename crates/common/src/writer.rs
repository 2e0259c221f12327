use chrono::{DateTime, NaiveDate, Utc};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::LogConfig;
use crate::errors::{LogError, LogResult};
use crate::record::{BashInvocation, LogRecord};

pub const LOG_FILE_PREFIX: &str = "bash-commands-";
pub const LOG_FILE_EXTENSION: &str = "jsonl";

/// Appends records to date-partitioned JSONL files under one directory.
///
/// No handle is kept between appends: each call creates the directory if
/// needed, opens the day's file in append mode, writes one line and closes it.
#[derive(Debug, Clone)]
pub struct LogWriter {
    dir: PathBuf,
}

impl LogWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &LogConfig) -> Self {
        Self::new(config.log_dir.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File receiving records written on `date` (UTC).
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!(
            "{LOG_FILE_PREFIX}{}.{LOG_FILE_EXTENSION}",
            date.format("%Y-%m-%d")
        ))
    }

    pub fn append(&self, invocation: &BashInvocation) -> LogResult<PathBuf> {
        self.append_at(invocation, Utc::now())
    }

    /// Appends a record stamped with `at`; the file is chosen from the same
    /// instant so timestamp and partition always agree.
    pub fn append_at(&self, invocation: &BashInvocation, at: DateTime<Utc>) -> LogResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|source| LogError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;
        tracing::trace!(dir = %self.dir.display(), "log directory ready");

        let record = LogRecord::from_invocation(invocation, at);
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let path = self.path_for(at.date_naive());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LogError::Open {
                path: path.clone(),
                source,
            })?;

        // Single write so concurrent appenders never interleave inside a line.
        file.write_all(line.as_bytes())
            .map_err(|source| LogError::Append {
                path: path.clone(),
                source,
            })?;

        tracing::trace!(path = %path.display(), bytes = line.len(), "appended bash command record");
        Ok(path)
    }
}

/// Logs one bash command invocation and returns the file written to.
///
/// `log_dir` defaults to the directory resolved by [`LogConfig::from_env`].
pub fn log_bash_command(invocation: &BashInvocation, log_dir: Option<&Path>) -> LogResult<PathBuf> {
    let writer = match log_dir {
        Some(dir) => LogWriter::new(dir),
        None => LogWriter::from_config(&LogConfig::from_env()),
    };
    writer.append(invocation)
}
