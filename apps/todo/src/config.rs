//! Configuration management for the todo binary.
//!
//! Loads configuration from environment variables with sensible defaults.
//! None of it affects todo behavior; it only concerns logging and the
//! terminal session.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "retro_todo=info,retro_runtime=info";
/// Default terminal poll interval in milliseconds
pub const DEFAULT_POLL_MS: u64 = 250;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// File receiving log output; the terminal itself belongs to the UI
    pub log_file: PathBuf,
    /// `tracing-subscriber` filter directive
    pub log_filter: String,
    /// How long to wait for a terminal event before looping
    pub poll_interval: Duration,
    /// Capture mouse events (needed to click Add, rows and Delete)
    pub mouse: bool,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// - `RETRO_TODO_LOG_FILE`: log file path (default `<tmp>/retro-todo.log`)
    /// - `RUST_LOG`: tracing filter (default [`DEFAULT_LOG_FILTER`])
    /// - `RETRO_TODO_POLL_MS`: poll interval in milliseconds (default [`DEFAULT_POLL_MS`])
    /// - `RETRO_TODO_MOUSE`: `false`/`0`/`off` disables mouse capture
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_file: lookup("RETRO_TODO_LOG_FILE")
                .filter(|s| !s.trim().is_empty())
                .map_or_else(|| env::temp_dir().join("retro-todo.log"), PathBuf::from),
            log_filter: lookup("RUST_LOG")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            poll_interval: Duration::from_millis(
                lookup("RETRO_TODO_POLL_MS")
                    .and_then(|s| s.trim().parse().ok())
                    .filter(|ms| *ms > 0)
                    .unwrap_or(DEFAULT_POLL_MS),
            ),
            mouse: lookup("RETRO_TODO_MOUSE")
                .and_then(|s| parse_flag(&s))
                .unwrap_or(true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
