//! Hook entry points.
//!
//! [`run`] is the honest pipeline (read, parse, write) and reports every
//! failure. Input that is not a JSON object is an error, so nothing gets
//! logged for it. [`run_fail_open`] wraps `run` for the host: whatever
//! happens inside, the host gets `{}` and a successful exit.

use anyhow::{Context, Result};
use bashlog_common::{LogConfig, LogWriter};
use std::io::{Read, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use crate::event::HookEvent;

/// Acknowledgement written to the host on every invocation.
pub const ACK: &str = "{}";

pub fn run<R: Read>(mut input: R, config: &LogConfig) -> Result<PathBuf> {
    let mut raw = Vec::new();
    input
        .read_to_end(&mut raw)
        .context("failed to read hook input")?;

    let invocation = HookEvent::parse(&raw)
        .context("unusable hook event")?
        .into_invocation();
    let path = LogWriter::from_config(config)
        .append(&invocation)
        .with_context(|| format!("failed to log command '{}'", invocation.command))?;

    tracing::debug!(path = %path.display(), "bash command logged");
    Ok(path)
}

/// Runs the hook and always acknowledges. Errors and panics from [`run`]
/// are traced and dropped; so is a failure to write the acknowledgement.
pub fn run_fail_open<R: Read, W: Write>(input: R, mut output: W, config: &LogConfig) {
    match panic::catch_unwind(AssertUnwindSafe(|| run(input, config))) {
        Ok(Ok(_)) => {}
        Ok(Err(err)) => tracing::warn!(error = format!("{err:#}"), "bash command not logged"),
        Err(_) => tracing::warn!("bash command logging panicked"),
    }

    let _ = writeln!(output, "{ACK}");
    let _ = output.flush();
}
