//! Snapshot reader

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{SnapshotError, SnapshotResult};
use crate::options::SnapshotReadOptions;
use crate::HEADER;
use gridmark_core::{CellAddress, CellState, Snapshot};

/// CSV snapshot reader
pub struct SnapshotReader;

impl SnapshotReader {
    /// Read a snapshot file
    pub fn read_file<P: AsRef<Path>>(
        path: P,
        options: &SnapshotReadOptions,
    ) -> SnapshotResult<Snapshot> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read a snapshot from a reader
    ///
    /// Every record is validated before the snapshot is returned, so a
    /// malformed file never yields a partial snapshot.
    pub fn read<R: Read>(reader: R, options: &SnapshotReadOptions) -> SnapshotResult<Snapshot> {
        let trim = if options.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        };
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(options.has_header)
            .trim(trim)
            .from_reader(reader);

        if options.has_header {
            let headers = csv_reader.headers()?;
            let matches = headers.len() == HEADER.len()
                && headers
                    .iter()
                    .zip(HEADER)
                    .all(|(found, expected)| found.eq_ignore_ascii_case(expected));
            if !matches {
                return Err(SnapshotError::Header {
                    found: headers.iter().collect::<Vec<_>>().join(","),
                });
            }
        }

        let mut entries: BTreeMap<CellAddress, CellState> = BTreeMap::new();
        for (idx, result) in csv_reader.records().enumerate() {
            let record = result?;
            let record_no = idx + 1;
            let parse_error = |field: &'static str, message: String| SnapshotError::Parse {
                record: record_no,
                field,
                message,
            };

            if record.len() != 2 {
                return Err(parse_error(
                    "record",
                    format!("expected 2 fields, found {}", record.len()),
                ));
            }

            let address =
                CellAddress::parse(&record[0]).map_err(|e| parse_error("address", e.to_string()))?;
            let state =
                CellState::parse(&record[1]).map_err(|e| parse_error("state", e.to_string()))?;

            if let Some(previous) = entries.insert(address.clone(), state) {
                if options.reject_duplicates {
                    return Err(parse_error(
                        "address",
                        format!("{} already marked {}", address, previous),
                    ));
                }
                log::warn!("record {} overrides {} for {}", record_no, previous, address);
            }
        }

        log::debug!("read {} snapshot records", entries.len());
        Ok(Snapshot::from_entries(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SnapshotWriteOptions, SnapshotWriter};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_read_records() {
        let data = "address,state\n1.2689_103.8216,gold\n1.2743_103.8000,Blue\n";
        let snapshot = SnapshotReader::read(data.as_bytes(), &SnapshotReadOptions::default())
            .unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot.get(&CellAddress::parse("1.2743_103.8000").unwrap()),
            Some(CellState::Blue)
        );
    }

    #[test]
    fn test_read_rejects_bad_records() {
        let options = SnapshotReadOptions::default();

        let err = SnapshotReader::read("address,state\n1.2689_103.8216,red\n".as_bytes(), &options)
            .unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::Parse {
                record: 1,
                field: "state",
                ..
            }
        ));

        let err = SnapshotReader::read(
            "address,state\n1.2689_103.8216,gold\nnot-an-address,gold\n".as_bytes(),
            &options,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::Parse {
                record: 2,
                field: "address",
                ..
            }
        ));

        // Ragged rows are rejected by the csv reader itself
        assert!(SnapshotReader::read(
            "address,state\n1.2689_103.8216,gold,extra\n".as_bytes(),
            &options
        )
        .is_err());
    }

    #[test]
    fn test_read_checks_header() {
        let err = SnapshotReader::read(
            "cell,colour\n1.2689_103.8216,gold\n".as_bytes(),
            &SnapshotReadOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SnapshotError::Header { ref found } if found == "cell,colour"));

        let options = SnapshotReadOptions {
            has_header: false,
            ..Default::default()
        };
        let snapshot =
            SnapshotReader::read("1.2689_103.8216,gold\n".as_bytes(), &options).unwrap();
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_read_trims_fields() {
        let data = "address , state\n 1.2689_103.8216 , gold \n";

        let snapshot =
            SnapshotReader::read(data.as_bytes(), &SnapshotReadOptions::default()).unwrap();
        assert_eq!(
            snapshot.get(&CellAddress::parse("1.2689_103.8216").unwrap()),
            Some(CellState::Gold)
        );

        let options = SnapshotReadOptions {
            trim: false,
            ..Default::default()
        };
        assert!(SnapshotReader::read(data.as_bytes(), &options).is_err());
    }

    #[test]
    fn test_read_duplicate_addresses() {
        let data = "address,state\n1.2689_103.8216,gold\n1.2689_103.8216,blue\n";

        let err = SnapshotReader::read(data.as_bytes(), &SnapshotReadOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::Parse {
                record: 2,
                field: "address",
                ..
            }
        ));

        let options = SnapshotReadOptions {
            reject_duplicates: false,
            ..Default::default()
        };
        let snapshot = SnapshotReader::read(data.as_bytes(), &options).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.get(&CellAddress::parse("1.2689_103.8216").unwrap()),
            Some(CellState::Blue)
        );
    }

    #[test]
    fn test_file_round_trip() {
        let snapshot = Snapshot::from_entries(vec![
            (CellAddress::parse("1.2689_103.8216").unwrap(), CellState::Gold),
            (CellAddress::parse("1.3014_103.8919").unwrap(), CellState::Blue),
        ]);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        SnapshotWriter::write(&snapshot, file.as_file_mut(), &SnapshotWriteOptions::default())
            .unwrap();
        file.flush().unwrap();

        let restored =
            SnapshotReader::read_file(file.path(), &SnapshotReadOptions::default()).unwrap();
        assert_eq!(restored, snapshot);
    }
}
