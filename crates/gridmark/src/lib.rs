//! # gridmark
//!
//! Mark cells of a fixed geographic grid, persist the marks, search for
//! places and render the result.
//!
//! ## Features
//!
//! - Deterministic cell addresses from coordinates (`"1.2689_103.8216"`)
//! - Single-cell and rectangular range marking
//! - CSV and JSON snapshots, picked by file extension
//! - Pluggable geocoding with an offline gazetteer
//! - GeoJSON rendering of the lattice, its marks and a search marker
//!
//! ## Example
//!
//! ```rust
//! use gridmark::prelude::*;
//!
//! let mut session = GridSession::new(GridConfig::default()).unwrap();
//!
//! let outcome = session.apply(Command::MarkRange {
//!     a: LatLon::new(1.3521, 103.8198),
//!     b: LatLon::new(1.3621, 103.8298),
//!     state: CellState::Gold,
//! });
//! assert!(outcome.changed);
//!
//! let map = session.render(&GeoJsonRenderer::new()).unwrap();
//! assert_eq!(map["type"], "FeatureCollection");
//! ```

pub mod config;
pub mod error;
pub mod prelude;
pub mod render;
pub mod search;
pub mod seed;
pub mod session;
pub mod snapshot;

pub use config::GridConfig;
pub use error::{Error, Result};
pub use render::{GeoJsonRenderer, MapRenderer, MapScene, MapView, Marker};
pub use search::{GazetteerGeocoder, GeocodeError, Geocoder, LocationSearch, Place, SearchOutcome};
pub use seed::{parse_addresses, sample_seed, SAMPLE_GOLD_CELLS};
pub use session::{Command, GridSession, Notice, NoticeLevel, Outcome};
pub use snapshot::{load_snapshot, save_snapshot, SnapshotFormat};

// Re-export core types
pub use gridmark_core::{
    address_of, cell_size_degrees, generate_lattice, resolve_range, Cell, CellAddress, CellState,
    CellStateStore, GeoRange, Grid, LatLon, Region, Snapshot, ADDRESS_PRECISION, KM_PER_DEGREE,
};

// Re-export I/O types
pub use gridmark_csv::{
    SnapshotError, SnapshotReadOptions, SnapshotReader, SnapshotWriteOptions, SnapshotWriter,
};
