//! Reporting setup.
//!
//! [`init`] builds a `tracing` subscriber and installs it for the current thread. The returned
//! [`LogGuard`] keeps it installed; dropping the guard uninstalls the subscriber and closes the
//! log file, if any.

use std::{
    fs::OpenOptions,
    io,
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;

/// Keeps the subscriber created by [`init`] active until dropped.
#[must_use = "logging stops when the guard is dropped"]
pub struct LogGuard {
    _default: DefaultGuard,
}

/// Sets up logging for the current thread.
///
/// # Arguments
///
/// * `filter` - Filter directives such as `"info"` or `"gol_console=debug"`. The `RUST_LOG`
///   environment variable takes precedence when set.
/// * `log_file` - Append log lines to this file instead of writing them to stderr.
///
/// # Errors
///
/// Fails when the filter cannot be parsed or the log file cannot be opened.
pub fn init(filter: &str, log_file: Option<&Path>) -> Result<LogGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .with_context(|| format!("invalid log filter {filter:?}"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true);

    let default = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            let subscriber = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish();
            tracing::subscriber::set_default(subscriber)
        }
        None => tracing::subscriber::set_default(builder.with_writer(io::stderr).finish()),
    };

    Ok(LogGuard { _default: default })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn writes_to_log_file_until_guard_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gol.log");

        let guard = init("info", Some(&path)).unwrap();
        tracing::info!("first generation rendered");
        drop(guard);
        tracing::info!("after shutdown");

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("first generation rendered"));
        assert!(!contents.contains("after shutdown"));
    }

    #[test]
    fn unopenable_log_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir").join("gol.log");
        assert!(init("info", Some(&missing)).is_err());
    }
}
