//! Error types for the networking module.

use thiserror::Error;

/// Network-specific errors.
///
/// Losing connectivity is not an error; it is reported as
/// [`ConnectionStatus::NotConnected`](crate::ConnectionStatus::NotConnected).
/// These variants only cover failures of the observation machinery itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// The platform path observer could not be started.
    #[error("path observer error: {0}")]
    Observer(String),
}

/// A specialized Result type for network operations.
pub type Result<T> = std::result::Result<T, NetworkError>;
