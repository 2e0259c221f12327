//! Log record schema for bash command invocations.
//!
//! A [`LogRecord`] is what lands on disk, one per line. Field declaration order
//! is the serialized order and is part of the file format; do not reorder.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Schema version written into every record.
pub const LOG_FORMAT_VERSION: u32 = 1;

/// Maximum number of characters kept in `result_preview`.
pub const RESULT_PREVIEW_MAX_LENGTH: usize = 500;

/// Value of the `tool` field.
pub const TOOL_NAME: &str = "Bash";

/// Normalized attributes of one tool invocation, as handed to the writer.
///
/// `result` is `None` when the event carried no response at all and
/// `Some("")` when it carried an empty one. Both render identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BashInvocation {
    pub command: String,
    pub session_id: String,
    pub description: String,
    pub cwd: String,
    pub result: Option<String>,
    pub exit_code: Option<i64>,
}

impl BashInvocation {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    pub fn with_exit_code(mut self, exit_code: i64) -> Self {
        self.exit_code = Some(exit_code);
        self
    }
}

/// One line of a `bash-commands-<date>.jsonl` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub version: u32,
    /// RFC 3339, UTC, always with a `+00:00` offset.
    pub timestamp: String,
    pub session_id: String,
    pub tool: String,
    pub command: String,
    pub description: String,
    pub cwd: String,
    /// Character count of the full, untruncated result.
    pub result_length: usize,
    pub result_preview: String,
    pub exit_code: Option<i64>,
}

impl LogRecord {
    pub fn from_invocation(invocation: &BashInvocation, at: DateTime<Utc>) -> Self {
        let raw = invocation.result.as_deref().unwrap_or("");
        Self {
            version: LOG_FORMAT_VERSION,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Micros, false),
            session_id: invocation.session_id.clone(),
            tool: TOOL_NAME.to_string(),
            command: invocation.command.clone(),
            description: invocation.description.clone(),
            cwd: invocation.cwd.clone(),
            result_length: raw.chars().count(),
            result_preview: preview(raw).to_string(),
            exit_code: invocation.exit_code,
        }
    }
}

/// Longest prefix of `raw` holding at most [`RESULT_PREVIEW_MAX_LENGTH`]
/// characters. Never splits a character.
pub fn preview(raw: &str) -> &str {
    match raw.char_indices().nth(RESULT_PREVIEW_MAX_LENGTH) {
        Some((cut, _)) => &raw[..cut],
        None => raw,
    }
}
