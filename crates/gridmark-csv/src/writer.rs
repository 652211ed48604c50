//! Snapshot writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::SnapshotResult;
use crate::options::{LineTerminator, SnapshotWriteOptions};
use crate::HEADER;
use gridmark_core::Snapshot;

/// CSV snapshot writer
pub struct SnapshotWriter;

impl SnapshotWriter {
    /// Write a snapshot to a file, replacing any existing file
    pub fn write_file<P: AsRef<Path>>(
        snapshot: &Snapshot,
        path: P,
        options: &SnapshotWriteOptions,
    ) -> SnapshotResult<()> {
        let file = File::create(path)?;
        Self::write(snapshot, file, options)
    }

    /// Write a snapshot to a writer
    pub fn write<W: Write>(
        snapshot: &Snapshot,
        writer: W,
        options: &SnapshotWriteOptions,
    ) -> SnapshotResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .terminator(terminator)
            .from_writer(writer);

        if options.write_header {
            csv_writer.write_record(HEADER)?;
        }

        for (address, state) in snapshot.iter() {
            csv_writer.write_record([address.as_str(), state.name()])?;
        }

        csv_writer.flush()?;
        log::debug!("wrote {} snapshot records", snapshot.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridmark_core::{CellAddress, CellState};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_is_ordered_with_header() {
        let snapshot = Snapshot::from_entries(vec![
            (CellAddress::parse("1.2743_103.8000").unwrap(), CellState::Blue),
            (CellAddress::parse("1.2689_103.8216").unwrap(), CellState::Gold),
        ]);

        let mut buf = Vec::new();
        SnapshotWriter::write(&snapshot, &mut buf, &SnapshotWriteOptions::default()).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "address,state\n1.2689_103.8216,gold\n1.2743_103.8000,blue\n"
        );
    }

    #[test]
    fn test_write_without_header_crlf() {
        let snapshot = Snapshot::from_entries(vec![(
            CellAddress::parse("1.2689_103.8216").unwrap(),
            CellState::Gold,
        )]);
        let options = SnapshotWriteOptions {
            delimiter: b';',
            write_header: false,
            line_terminator: LineTerminator::CRLF,
            ..Default::default()
        };

        let mut buf = Vec::new();
        SnapshotWriter::write(&snapshot, &mut buf, &options).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "1.2689_103.8216;gold\r\n");
    }
}
