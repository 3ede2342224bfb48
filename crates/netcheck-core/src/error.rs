//! Error types for the NetCheck core runtime.

use thiserror::Error;

/// The main error type for core runtime operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The event loop has been dropped or has already quit.
    #[error("the event loop has already exited")]
    EventLoopExited,
}

/// A specialized Result type for core runtime operations.
pub type Result<T> = std::result::Result<T, CoreError>;
