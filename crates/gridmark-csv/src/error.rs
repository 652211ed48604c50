//! Snapshot error types

use thiserror::Error;

/// Result type for snapshot operations
pub type SnapshotResult<T> = std::result::Result<T, SnapshotError>;

/// Errors that can occur while reading or writing a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The header row is not `address,state`
    #[error("unexpected snapshot header: {found}")]
    Header { found: String },

    /// A record whose `field` column could not be used
    #[error("bad {field} at record {record}: {message}")]
    Parse {
        record: usize,
        field: &'static str,
        message: String,
    },
}
