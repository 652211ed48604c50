//! Map rendering
//!
//! A renderer is a pure consumer: it reads a [`MapScene`] and produces an
//! artifact, never writing back into the session.

use gridmark_core::{Cell, CellStateStore, LatLon};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Error, Result};

/// Outline colour of every cell
pub const CELL_STROKE: &str = "black";
/// Outline width of every cell
pub const CELL_WEIGHT: u32 = 1;
/// Fill opacity of every cell
pub const CELL_FILL_OPACITY: f64 = 0.3;
/// Colour of the search marker
pub const MARKER_COLOR: &str = "red";

/// Where the map is centered and how far it is zoomed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// Map center
    pub center: LatLon,
    /// Zoom level
    pub zoom: u8,
}

/// A labelled point placed on the map by a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Marker position
    pub position: LatLon,
    /// Popup text
    pub label: String,
}

/// Everything a renderer needs, borrowed read-only from a session
#[derive(Debug, Clone, Copy)]
pub struct MapScene<'a> {
    /// The lattice, in lattice order
    pub cells: &'a [Cell],
    /// Current cell states
    pub store: &'a CellStateStore,
    /// Search marker, if any
    pub marker: Option<&'a Marker>,
    /// View to open the map at
    pub view: MapView,
}

/// Something that draws a scene
pub trait MapRenderer {
    /// The rendered artifact
    type Output;

    /// Draw `scene`
    fn render(&self, scene: &MapScene<'_>) -> Result<Self::Output>;
}

/// Renders a scene as a GeoJSON `FeatureCollection`
///
/// Each cell becomes a Polygon feature carrying its id, state and style; the
/// marker becomes a Point feature. The view is a top-level `view` member.
#[derive(Debug, Clone, Default)]
pub struct GeoJsonRenderer {
    /// Leave unset cells out of the output
    pub skip_unset: bool,
}

impl GeoJsonRenderer {
    /// Create a renderer that draws every cell
    pub fn new() -> Self {
        Self::default()
    }

    /// Render to a pretty-printed JSON string
    pub fn render_to_string(&self, scene: &MapScene<'_>) -> Result<String> {
        let value = self.render(scene)?;
        serde_json::to_string_pretty(&value).map_err(|e| Error::collaborator(e.to_string()))
    }

    fn cell_feature(cell: &Cell, store: &CellStateStore) -> (Value, bool) {
        let state = store.get_state(&cell.address);
        let [[south, west], [north, east]] = cell.bounds();

        let feature = json!({
            "type": "Feature",
            "id": cell.address.as_str(),
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [west, south],
                    [east, south],
                    [east, north],
                    [west, north],
                    [west, south],
                ]],
            },
            "properties": {
                "id": cell.address.as_str(),
                "state": state.name(),
                "fill_color": state.fill_color(),
                "fill_opacity": CELL_FILL_OPACITY,
                "stroke_color": CELL_STROKE,
                "weight": CELL_WEIGHT,
                "popup": format!("Grid ID: {}", cell.address),
            },
        });
        (feature, state.is_unset())
    }
}

impl MapRenderer for GeoJsonRenderer {
    type Output = Value;

    fn render(&self, scene: &MapScene<'_>) -> Result<Value> {
        let mut features: Vec<Value> = scene
            .cells
            .iter()
            .map(|cell| Self::cell_feature(cell, scene.store))
            .filter(|(_, unset)| !(self.skip_unset && *unset))
            .map(|(feature, _)| feature)
            .collect();

        if let Some(marker) = scene.marker {
            features.push(json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [marker.position.lon, marker.position.lat],
                },
                "properties": {
                    "marker": true,
                    "marker_color": MARKER_COLOR,
                    "popup": marker.label,
                },
            }));
        }

        log::debug!("rendered {} features", features.len());
        Ok(json!({
            "type": "FeatureCollection",
            "view": {
                "center": [scene.view.center.lat, scene.view.center.lon],
                "zoom": scene.view.zoom,
            },
            "features": features,
        }))
    }
}
