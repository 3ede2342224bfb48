//! Error types for the NetCheck application.

use std::path::PathBuf;

use netcheck_core::CoreError;
use netcheck_net::NetworkError;
use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// The configuration file could not be read or is invalid.
    #[error("invalid configuration in {}: {message}", path.display())]
    Config {
        /// Where the configuration came from.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },
    /// The log filter could not be built.
    #[error("invalid log filter '{directive}': {message}")]
    Logging {
        /// The rejected directive.
        directive: String,
        /// Parser message.
        message: String,
    },
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The UI event loop failed.
    #[error(transparent)]
    Core(#[from] CoreError),
    /// The reachability monitor failed.
    #[error(transparent)]
    Network(#[from] NetworkError),
}

impl AppError {
    /// Create a configuration error for `path`.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A specialized Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
