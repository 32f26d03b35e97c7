//! File logging.
//!
//! The terminal belongs to the UI, so log output goes to a daily-rotated
//! file under `$CVCHAT_HOME/logs`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::paths;

const LOG_FILE_PREFIX: &str = "cvchat.log";

/// Installs the global subscriber writing to the default logs directory.
///
/// `RUST_LOG` overrides `level`. Keep the returned guard alive for the
/// lifetime of the process; dropping it flushes and stops the writer.
///
/// # Errors
/// Returns an error if the logs directory cannot be created or a global
/// subscriber is already installed.
pub fn init(level: &str) -> Result<WorkerGuard> {
    init_in(&paths::logs_dir(), level)
}

/// Same as [`init`] with an explicit directory.
///
/// # Errors
/// See [`init`].
pub fn init_in(dir: &Path, level: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(guard)
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

