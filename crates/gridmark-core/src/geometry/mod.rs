//! Grid geometry
//!
//! This module contains:
//! - [`Region`] and [`LatLon`] - The bounding box being gridded and plain coordinates
//! - [`CellAddress`] - A cell's canonical key (e.g., "1.2689_103.8216")
//! - [`Grid`] and [`Cell`] - The lattice of cells and a single lattice rectangle
//!
//! Everything here is pure: no function holds or mutates state.

mod address;
mod lattice;
mod region;

pub use address::CellAddress;
pub use lattice::{address_of, cell_size_degrees, generate_lattice, Cell, Grid, LatticeIter};
pub use region::{LatLon, Region};
