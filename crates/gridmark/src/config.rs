//! Session configuration

use std::path::{Path, PathBuf};

use gridmark_core::{cell_size_degrees, CellState, LatLon, Region};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings for a [`GridSession`](crate::GridSession)
///
/// Every field has a default, so a JSON config file only needs the keys it
/// changes:
///
/// ```json
/// { "cell_size_km": 1.2, "snapshot_path": "marks.json" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Area to grid
    pub region: Region,
    /// Cell edge length in kilometres
    pub cell_size_km: f64,
    /// Where snapshots are saved and loaded; the extension picks the format
    pub snapshot_path: PathBuf,
    /// Place qualifier appended to search queries
    pub locale: String,
    /// Initial map center
    pub center: LatLon,
    /// Initial zoom level
    pub zoom: u8,
    /// Zoom level after a successful search
    pub search_zoom: u8,
    /// State given to every unmarked lattice cell when a session starts
    pub prefill: Option<CellState>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            region: Region::SINGAPORE,
            cell_size_km: 0.6,
            snapshot_path: PathBuf::from("grid_colors.csv"),
            locale: "Singapore".to_string(),
            center: LatLon::new(1.3521, 103.8198),
            zoom: 12,
            search_zoom: 15,
            prefill: None,
        }
    }
}

impl GridConfig {
    /// Read a JSON config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(format!("config file '{}'", path.display()))
            } else {
                Error::storage(format!("reading '{}': {}", path.display(), e))
            }
        })?;

        let config: GridConfig = serde_json::from_str(&text).map_err(|e| {
            Error::InvalidArgument(format!("config '{}': {}", path.display(), e))
        })?;
        config.validate()?;

        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Check the region and cell size
    pub fn validate(&self) -> Result<()> {
        self.region.validate()?;
        cell_size_degrees(self.cell_size_km)?;
        if !self.center.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "map center must be finite: {}",
                self.center
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GridConfig::default();
        assert_eq!(config.region, Region::SINGAPORE);
        assert_eq!(config.cell_size_km, 0.6);
        assert_eq!(config.zoom, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"cell_size_km": 1.2, "prefill": "blue"}}"#).unwrap();

        let config = GridConfig::from_file(file.path()).unwrap();
        assert_eq!(config.cell_size_km, 1.2);
        assert_eq!(config.prefill, Some(CellState::Blue));
        assert_eq!(config.locale, "Singapore");
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"cell_size_km": -1.0}}"#).unwrap();
        assert!(matches!(
            GridConfig::from_file(file.path()),
            Err(Error::InvalidArgument(_))
        ));

        assert!(matches!(
            GridConfig::from_file("/nonexistent/gridmark.json"),
            Err(Error::NotFound(_))
        ));
    }
}
