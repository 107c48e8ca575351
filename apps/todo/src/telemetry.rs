//! Tracing setup.
//!
//! The terminal is owned by the UI, so logs are written to a file.

use crate::config::Config;
use crate::error::{AppError, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber writing to `config.log_file`
///
/// # Errors
///
/// Returns [`AppError::Io`] if the log file cannot be opened and
/// [`AppError::Telemetry`] if the filter is invalid or a subscriber is
/// already installed.
pub fn init(config: &Config) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let filter = EnvFilter::try_new(&config.log_filter)
        .map_err(|e| AppError::Telemetry(format!("invalid filter {:?}: {e}", config.log_filter)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| AppError::Telemetry(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_is_reported() {
        let config = Config {
            log_file: std::env::temp_dir().join("retro-todo-telemetry-test.log"),
            log_filter: "retro_todo=loud".to_string(),
            ..Config::default()
        };

        let err = init(&config).unwrap_err();
        assert!(matches!(err, AppError::Telemetry(_)));
    }

    #[test]
    fn unwritable_log_file_is_reported() {
        let config = Config {
            log_file: std::env::temp_dir()
                .join("retro-todo-missing-dir")
                .join("nested")
                .join("todo.log"),
            ..Config::default()
        };

        let err = init(&config).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
