//! Cell state representation

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The mark applied to a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CellState {
    /// No mark; rendered transparent
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "transparent", alias = "none"))]
    Unset,

    /// Blue mark
    Blue,

    /// Gold mark
    Gold,
}

impl CellState {
    /// All states, in display order
    pub const ALL: [CellState; 3] = [CellState::Unset, CellState::Blue, CellState::Gold];

    /// Lowercase name used in snapshots and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            CellState::Unset => "unset",
            CellState::Blue => "blue",
            CellState::Gold => "gold",
        }
    }

    /// CSS colour used to fill a cell with this state
    pub fn fill_color(&self) -> &'static str {
        match self {
            CellState::Unset => "transparent",
            CellState::Blue => "blue",
            CellState::Gold => "gold",
        }
    }

    /// RGB fill as hex (without # prefix), `None` when unset
    pub fn to_hex(&self) -> Option<&'static str> {
        match self {
            CellState::Unset => None,
            CellState::Blue => Some("0000FF"),
            CellState::Gold => Some("FFD700"),
        }
    }

    /// Check if this is the unset state
    pub fn is_unset(&self) -> bool {
        matches!(self, CellState::Unset)
    }

    /// Parse a state name (case-insensitive)
    ///
    /// # Examples
    /// ```
    /// use gridmark_core::CellState;
    ///
    /// assert_eq!(CellState::parse("Gold").unwrap(), CellState::Gold);
    /// assert_eq!(CellState::parse("transparent").unwrap(), CellState::Unset);
    /// assert!(CellState::parse("red").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unset" | "transparent" | "none" => Ok(CellState::Unset),
            "blue" => Ok(CellState::Blue),
            "gold" => Ok(CellState::Gold),
            other => Err(Error::InvalidState(other.to_string())),
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CellState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
