use crate::config::LoggingConfig;
use crate::constants::LOG_FILE_NAME;
use crate::error::{Result, StatsError};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes console logging on stderr and, when a directory is configured,
/// a daily-rotated JSON log file.
///
/// The returned guard must be held until exit so buffered file logs are flushed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("monarch_stats={}", config.level)));

    // stdout carries the report
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.directory {
        Some(dir) => {
            let file_appender = daily_file_appender(dir)?;
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
            (
                Some(fmt::layer().json().with_writer(non_blocking_writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(guard)
}

/// Daily-rotated appender under `dir`, created if missing.
pub fn daily_file_appender(dir: &Path) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_NAME)
        .build(dir)
        .map_err(|e| {
            StatsError::Config(format!(
                "Failed to open log directory '{}': {}",
                dir.display(),
                e
            ))
        })
}
