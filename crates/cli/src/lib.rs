// # -----------------------------
// # crates/cli/src/lib.rs
// # -----------------------------
//! Bash command logging hook.
//!
//! Reads one tool-use event on stdin, appends a summary line to the day's
//! `bash-commands-<date>.jsonl` and acknowledges with `{}`.

pub mod event;
pub mod hook;
pub mod telemetry;

pub use event::{adapt, HookEvent};
pub use hook::{run, run_fail_open, ACK};
