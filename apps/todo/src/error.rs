//! Error types for the todo application.
//!
//! Todo operations themselves never fail; these cover the terminal session
//! around them.

use retro_runtime::StoreError;
use thiserror::Error;

/// Errors from running the terminal application
#[derive(Error, Debug)]
pub enum AppError {
    /// Terminal setup, drawing or event polling failed
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The store rejected an action
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Logging could not be initialised
    #[error("Failed to initialise logging: {0}")]
    Telemetry(String),
}

/// Result alias for application operations
pub type Result<T> = std::result::Result<T, AppError>;
