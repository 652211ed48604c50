//! Prelude module - common imports for gridmark users
//!
//! ```rust
//! use gridmark::prelude::*;
//! ```

pub use crate::{
    // Geometry
    Cell,
    CellAddress,
    // Cell state
    CellState,
    CellStateStore,
    // Session
    Command,
    // Error types
    Error,
    // Search
    GazetteerGeocoder,
    // Rendering
    GeoJsonRenderer,
    GeoRange,
    Geocoder,
    Grid,
    GridConfig,
    GridSession,
    LatLon,
    LocationSearch,
    MapRenderer,
    Notice,
    NoticeLevel,
    Outcome,
    Region,
    Result,
    SearchOutcome,
    Snapshot,
};
