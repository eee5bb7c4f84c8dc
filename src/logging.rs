//! File logging.
//!
//! The terminal belongs to the UI, so log lines go to
//! `<log dir>/tracksweep.log`. `RUST_LOG` overrides the configured level.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{self, LoggingSettings};

pub const LOG_FILE: &str = "tracksweep.log";

/// Directory log files are written to.
pub fn log_dir(settings: &LoggingSettings) -> PathBuf {
    settings
        .directory
        .clone()
        .or_else(config::default_log_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Install the global subscriber. Keep the guard alive until exit so buffered lines are flushed.
pub fn init(settings: &LoggingSettings) -> Result<WorkerGuard> {
    let dir = log_dir(settings);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .with_context(|| format!("invalid log level {:?}", settings.level))?;

    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_target(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("installing the tracing subscriber")?;

    Ok(guard)
}
