//! File logging for the application.
//!
//! The TUI owns the terminal, so nothing may be written to stdout or stderr
//! while it runs. All log output goes to size-rotated files in the data
//! directory instead.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use std::path::Path;
use thiserror::Error;

const LOG_FILE_BASENAME: &str = "journal";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;
const LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Unsupported log level '{0}' (expected one of off, error, warn, info, debug, trace)")]
    InvalidLevel(String),
    #[error("Failed to create log directory {0}: {1}")]
    DirectoryError(String, String),
    #[error("Failed to start logger: {0}")]
    StartError(#[from] flexi_logger::FlexiLoggerError),
}

/// Lower-cased level if it is one the logger understands
pub fn normalize_level(level: &str) -> Result<String, LoggingError> {
    let level = level.trim().to_ascii_lowercase();
    if LEVELS.contains(&level.as_str()) {
        Ok(level)
    } else {
        Err(LoggingError::InvalidLevel(level))
    }
}

/// Start logging into `log_dir`. Keep the returned handle alive for as long
/// as logging should stay active; dropping it flushes and stops the logger.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<LoggerHandle, LoggingError> {
    let level = normalize_level(level)?;

    std::fs::create_dir_all(log_dir)
        .map_err(|e| LoggingError::DirectoryError(log_dir.display().to_string(), e.to_string()))?;

    let handle = Logger::try_with_str(&level)?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    info!(
        "event=app_start version={} level={} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        level,
        log_dir.display()
    );

    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_levels_case_insensitively() {
        assert_eq!(normalize_level("INFO").unwrap(), "info");
        assert_eq!(normalize_level(" debug ").unwrap(), "debug");
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(matches!(normalize_level("loud"), Err(LoggingError::InvalidLevel(_))));
    }
}
