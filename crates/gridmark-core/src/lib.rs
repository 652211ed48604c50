//! # gridmark-core
//!
//! Core data structures for the gridmark map grid library.
//!
//! This crate provides the fundamental types used throughout gridmark:
//! - [`Region`], [`Grid`] and [`Cell`] - The cell lattice over a bounding box
//! - [`CellAddress`] - Stable cell identity derived from a lower-left corner
//! - [`GeoRange`] - Corner pairs resolved to the set of cells they cover
//! - [`CellState`] and [`CellStateStore`] - Per-cell marks and their snapshot
//!
//! ## Example
//!
//! ```rust
//! use gridmark_core::{CellState, CellStateStore, Grid, LatLon, Region};
//!
//! let region = Region::new(1.15, 1.47, 103.6, 104.0).unwrap();
//! let grid = Grid::new(region, 0.6).unwrap();
//!
//! let address = grid.address_of(1.3521, 103.8198);
//! let mut store = CellStateStore::new();
//! store.set_state(address.clone(), CellState::Gold);
//! assert_eq!(store.get_state(&address), CellState::Gold);
//!
//! let cells = grid
//!     .resolve_range(LatLon::new(1.3521, 103.8198), LatLon::new(1.3621, 103.8298))
//!     .unwrap();
//! assert_eq!(store.set_range(&cells, CellState::Blue), cells.len());
//! ```

pub mod error;
pub mod geometry;
pub mod range;
pub mod state;

// Re-exports for convenience
pub use error::{Error, Result};
pub use geometry::{
    address_of, cell_size_degrees, generate_lattice, Cell, CellAddress, Grid, LatLon, Region,
};
pub use range::{resolve_range, GeoRange};
pub use state::{CellState, CellStateStore, Snapshot};

/// Kilometres per degree of latitude used for the flat grid approximation
pub const KM_PER_DEGREE: f64 = 111.0;

/// Decimal places used when formatting cell addresses
pub const ADDRESS_PRECISION: usize = 4;
