//! Tracing setup for the `adcraft` binary.
//!
//! Console output always goes to stderr so stdout stays free for the
//! conversation and JSON results. With a logs directory configured, events
//! are also written as JSON lines to `adcraft.log.YYYY-MM-DD`.
//!
//! `RUST_LOG` wins over the configured level.

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log file prefix inside the logs directory.
const LOG_FILE_PREFIX: &str = "adcraft.log";

/// Keeps the background file writer alive; dropping it flushes the log.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

impl std::fmt::Debug for LoggingGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingGuard").finish_non_exhaustive()
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber for the configured destination.
///
/// Returns a guard only when file logging is active.
///
/// # Errors
///
/// See [`init_file`] and [`init_cli`].
pub fn init(
    logs_dir: Option<&Path>,
    default_level: &str,
) -> anyhow::Result<Option<LoggingGuard>> {
    match logs_dir {
        Some(dir) => init_file(dir, default_level).map(Some),
        None => init_cli(default_level).map(|()| None),
    }
}

/// JSON lines to a daily-rotated file, plus human-readable stderr.
///
/// # Errors
///
/// Returns an error if the logs directory cannot be created or a global
/// subscriber is already installed.
pub fn init_file(logs_dir: &Path, default_level: &str) -> anyhow::Result<LoggingGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("failed to create logs directory {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("failed to install file log subscriber")?;

    tracing::debug!(dir = %logs_dir.display(), "file logging enabled");
    Ok(LoggingGuard { _guard: guard })
}

/// Human-readable events on stderr only.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_cli(default_level: &str) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install console log subscriber: {e}"))
}
