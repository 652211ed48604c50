//! Error types for gridmark-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gridmark-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid argument passed to a geometry or range operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Unknown cell state name
    #[error("Invalid cell state: {0}")]
    InvalidState(String),
}

impl Error {
    /// Create a new invalid argument error with a message
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Error::InvalidArgument(msg.into())
    }
}
