// # -----------------------------
// # crates/common/src/lib.rs
// # -----------------------------
pub mod config;
pub mod errors;
pub mod record;
pub mod writer;

pub use config::LogConfig;
pub use errors::{LogError, LogResult};
pub use record::{BashInvocation, LogRecord, LOG_FORMAT_VERSION, RESULT_PREVIEW_MAX_LENGTH};
pub use writer::{log_bash_command, LogWriter};
