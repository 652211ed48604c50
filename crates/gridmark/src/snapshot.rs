//! Snapshot persistence by file extension

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use gridmark_core::Snapshot;
use gridmark_csv::{SnapshotReadOptions, SnapshotReader, SnapshotWriteOptions, SnapshotWriter};

use crate::error::{Error, Result};

/// On-disk snapshot encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// `address,state` records
    Csv,
    /// A JSON object of `"address": "state"` members
    Json,
}

impl SnapshotFormat {
    /// Pick the format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(SnapshotFormat::Csv),
            Some("json") => Ok(SnapshotFormat::Json),
            _ => Err(Error::storage(format!(
                "Unsupported snapshot format: {}",
                path.display()
            ))),
        }
    }
}

/// Write a snapshot, replacing whatever is at `path`
///
/// Concurrent writers are not coordinated; the last one wins.
pub fn save_snapshot<P: AsRef<Path>>(path: P, snapshot: &Snapshot) -> Result<()> {
    let path = path.as_ref();
    match SnapshotFormat::from_path(path)? {
        SnapshotFormat::Csv => {
            SnapshotWriter::write_file(snapshot, path, &SnapshotWriteOptions::default())?
        }
        SnapshotFormat::Json => {
            let file = File::create(path)
                .map_err(|e| Error::storage(format!("writing '{}': {}", path.display(), e)))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, snapshot)?;
            writer
                .flush()
                .map_err(|e| Error::storage(format!("writing '{}': {}", path.display(), e)))?;
        }
    }

    log::info!("saved {} cells to {}", snapshot.len(), path.display());
    Ok(())
}

/// Read a snapshot from `path`
///
/// A missing file is [`Error::NotFound`]; anything unreadable or malformed
/// is [`Error::Storage`].
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot> {
    let path = path.as_ref();
    let format = SnapshotFormat::from_path(path)?;
    if !path.exists() {
        return Err(Error::NotFound(format!(
            "no saved snapshot at '{}'",
            path.display()
        )));
    }

    let snapshot = match format {
        SnapshotFormat::Csv => SnapshotReader::read_file(path, &SnapshotReadOptions::default())?,
        SnapshotFormat::Json => {
            let file = File::open(path)
                .map_err(|e| Error::storage(format!("reading '{}': {}", path.display(), e)))?;
            serde_json::from_reader(BufReader::new(file))?
        }
    };

    log::info!("loaded {} cells from {}", snapshot.len(), path.display());
    Ok(snapshot)
}
