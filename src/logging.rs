use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_FILE_NAME;
use crate::error::{CleanerError, Result};

/// Initializes the logging system with both console and file output.
///
/// The returned guard flushes the file writer when dropped; keep it alive
/// for the duration of the run.
pub fn init_logging(log_dir: &Path) -> Result<WorkerGuard> {
    // Ensure logs directory exists
    fs::create_dir_all(log_dir).map_err(|e| {
        CleanerError::Config(format!("Cannot create log directory {}: {}", log_dir.display(), e))
    })?;

    // Create a non-blocking file appender for daily log rotation
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_NAME)
        .build(log_dir)
        .map_err(|e| {
            CleanerError::Config(format!("Cannot open log file in {}: {}", log_dir.display(), e))
        })?;
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    // Create a JSON layer for file logging
    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

    // Create a formatted layer for console logging
    let console_layer = fmt::layer().with_writer(std::io::stdout);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("shop_cleaner=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| CleanerError::Config(format!("Cannot install log subscriber: {}", e)))?;

    Ok(guard)
}
