//! Process-wide configuration for the bash command log.
//!
//! Only two knobs exist, both taken from the environment when the hook starts:
//! the log directory and the plugin installation root. Lookups go through an
//! injectable function so tests never touch the real process environment.

use std::path::{Path, PathBuf};

/// Overrides the base directory for all log files.
pub const LOG_DIR_ENV: &str = "CLAUDE_OBSERVABILITY_LOG_DIR";

/// Overrides the installation root of the hook.
pub const PLUGIN_ROOT_ENV: &str = "CLAUDE_PLUGIN_ROOT";

/// Used when `CLAUDE_OBSERVABILITY_LOG_DIR` is unset.
pub const DEFAULT_LOG_DIR: &str = "~/.claude/logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Directory receiving `bash-commands-<date>.jsonl` files.
    pub log_dir: PathBuf,
    /// Where the hook is installed, if it could be determined.
    pub plugin_root: Option<PathBuf>,
}

impl LogConfig {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            plugin_root: None,
        }
    }

    /// Resolves configuration from the process environment and the location
    /// of the running executable.
    pub fn from_env() -> Self {
        let exe = std::env::current_exe().ok();
        Self::from_lookup(|key| std::env::var(key).ok(), exe.as_deref())
    }

    /// Resolves configuration through `lookup` instead of the real environment.
    ///
    /// Empty values count as unset. A leading `~` is expanded against `HOME`
    /// (or `USERPROFILE`). Without a plugin root override, the root is the
    /// parent of the directory holding `exe`, i.e. `<root>/bin/<binary>`.
    pub fn from_lookup<F>(lookup: F, exe: Option<&Path>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let home = non_empty(lookup("HOME"))
            .or_else(|| non_empty(lookup("USERPROFILE")))
            .map(PathBuf::from);

        let log_dir = non_empty(lookup(LOG_DIR_ENV))
            .map(|raw| expand_tilde(&raw, home.as_deref()))
            .unwrap_or_else(|| expand_tilde(DEFAULT_LOG_DIR, home.as_deref()));

        let plugin_root = non_empty(lookup(PLUGIN_ROOT_ENV))
            .map(|raw| expand_tilde(&raw, home.as_deref()))
            .or_else(|| exe.and_then(install_root));

        Self {
            log_dir,
            plugin_root,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn expand_tilde(raw: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(raw);
    };
    if raw == "~" {
        return home.to_path_buf();
    }
    match raw.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(raw),
    }
}

fn install_root(exe: &Path) -> Option<PathBuf> {
    exe.parent()?.parent().map(Path::to_path_buf)
}
