// # -----------------------------
// # crates/cli/src/main.rs
// # -----------------------------
use bashlog_cli::{hook, telemetry};
use bashlog_common::LogConfig;
use std::io;
use std::panic;

fn main() {
    telemetry::init_tracing();

    // Keep panic output off the host's stderr; run_fail_open catches the unwind.
    panic::set_hook(Box::new(|info| {
        tracing::warn!(panic = %info, "panic in bash command hook");
    }));

    let config = LogConfig::from_env();
    tracing::debug!(
        log_dir = %config.log_dir.display(),
        plugin_root = ?config.plugin_root,
        "hook invoked"
    );

    hook::run_fail_open(io::stdin().lock(), io::stdout().lock(), &config);
}
