use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Env var selecting the diagnostic filter; `RUST_LOG` is used when unset.
pub const LOG_FILTER_ENV: &str = "BASHLOG_LOG";

/// Installs a stderr subscriber. Silent unless an operator opts in, since
/// the host may surface anything written to stderr.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("off"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(io::stderr)
        .try_init();
}
