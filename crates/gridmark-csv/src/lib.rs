//! # gridmark-csv
//!
//! CSV snapshot reader and writer for gridmark.
//!
//! A snapshot file is one `address,state` record per marked cell, in
//! address order, behind an optional header row.

mod reader;
mod writer;
mod options;
mod error;

pub use reader::SnapshotReader;
pub use writer::SnapshotWriter;
pub use options::{LineTerminator, SnapshotReadOptions, SnapshotWriteOptions};
pub use error::{SnapshotError, SnapshotResult};

/// Header row written before the records
pub const HEADER: [&str; 2] = ["address", "state"];
