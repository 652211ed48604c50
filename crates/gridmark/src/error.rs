//! Error types for the gridmark facade

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to a session
///
/// None of these are fatal: the session turns each one into a notice and
/// keeps its cell states as they were.
#[derive(Debug, Error)]
pub enum Error {
    /// Non-positive cell size, malformed corner or address, empty query
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Snapshot unreadable, corrupt, or not writable
    #[error("Storage error: {0}")]
    Storage(String),

    /// Missing snapshot, or a search that matched nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Geocoding provider or renderer failure
    #[error("Collaborator error: {0}")]
    Collaborator(String),
}

impl Error {
    /// Create a new storage error with a message
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Error::Storage(msg.into())
    }

    /// Create a new collaborator error with a message
    pub fn collaborator<S: Into<String>>(msg: S) -> Self {
        Error::Collaborator(msg.into())
    }
}

impl From<gridmark_core::Error> for Error {
    fn from(err: gridmark_core::Error) -> Self {
        Error::InvalidArgument(err.to_string())
    }
}

impl From<gridmark_csv::SnapshotError> for Error {
    fn from(err: gridmark_csv::SnapshotError) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Storage(err.to_string())
    }
}
