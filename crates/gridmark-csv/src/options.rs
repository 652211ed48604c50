//! Snapshot options

/// Options for reading snapshot files
#[derive(Debug, Clone)]
pub struct SnapshotReadOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Whether the first row is the `address,state` header
    pub has_header: bool,
    /// Strip whitespace around fields, as left by hand-edited files
    pub trim: bool,
    /// Fail on an address that appears twice instead of keeping the last row
    pub reject_duplicates: bool,
}

impl Default for SnapshotReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            trim: true,
            reject_duplicates: true,
        }
    }
}

/// Options for writing snapshot files
#[derive(Debug, Clone)]
pub struct SnapshotWriteOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Write the `address,state` header row
    pub write_header: bool,
    pub line_terminator: LineTerminator,
}

impl Default for SnapshotWriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            write_header: true,
            line_terminator: LineTerminator::LF,
        }
    }
}

/// Line terminator type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// Unix-style (LF)
    LF,
    /// Windows-style (CRLF)
    CRLF,
}
