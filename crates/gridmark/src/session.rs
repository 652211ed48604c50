//! Session controller
//!
//! A [`GridSession`] owns the lattice, the cell states and the map view for
//! one operator. Each user action is a [`Command`]; applying it returns an
//! [`Outcome`] carrying a notice for the user and whether the map needs to
//! be drawn again. Nothing re-renders implicitly.

use std::fmt;

use gridmark_core::{Cell, CellAddress, CellState, CellStateStore, Grid, LatLon};

use crate::config::GridConfig;
use crate::error::{Error, Result};
use crate::render::{MapRenderer, MapScene, MapView, Marker};
use crate::search::{Geocoder, LocationSearch, Place, SearchOutcome};
use crate::snapshot::{load_snapshot, save_snapshot};

/// A user action
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Mark one lattice cell
    SetCell {
        address: CellAddress,
        state: CellState,
    },
    /// Mark every cell of the rectangle spanned by two corners
    MarkRange {
        a: LatLon,
        b: LatLon,
        state: CellState,
    },
    /// Bulk-mark a list of addresses
    Seed {
        addresses: Vec<CellAddress>,
        state: CellState,
    },
    /// Write the cell states to the snapshot file
    Save,
    /// Replace the cell states with the snapshot file's contents
    Load,
    /// Remove every mark
    Clear,
    /// Look up a place and move the marker there
    Search { query: String },
}

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A dismissable message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new<S: Into<String>>(level: NoticeLevel, message: S) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of applying a [`Command`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// What to tell the user
    pub notice: Notice,
    /// Whether the map should be drawn again
    pub changed: bool,
}

impl Outcome {
    fn changed(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            notice: Notice::new(level, message),
            changed: true,
        }
    }

    fn unchanged(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            notice: Notice::new(level, message),
            changed: false,
        }
    }
}

/// The state of one operator's map session
pub struct GridSession {
    config: GridConfig,
    grid: Grid,
    lattice: Vec<Cell>,
    store: CellStateStore,
    marker: Option<Marker>,
    view: MapView,
    search: Option<LocationSearch<Box<dyn Geocoder>>>,
}

impl GridSession {
    /// Start a session: build the lattice once and an empty (or prefilled) store
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.region, config.cell_size_km)?;
        let lattice = grid.lattice();
        let view = MapView {
            center: config.center,
            zoom: config.zoom,
        };

        let mut session = Self {
            config,
            grid,
            lattice,
            store: CellStateStore::new(),
            marker: None,
            view,
            search: None,
        };
        session.prefill();

        log::info!(
            "session started with {} cells ({} x {})",
            session.lattice.len(),
            session.grid.rows(),
            session.grid.cols()
        );
        Ok(session)
    }

    /// Attach a geocoder for [`Command::Search`]
    pub fn with_geocoder<G: Geocoder + 'static>(mut self, geocoder: G) -> Self {
        let boxed: Box<dyn Geocoder> = Box::new(geocoder);
        self.search = Some(LocationSearch::new(boxed, self.config.locale.clone()));
        self
    }

    fn prefill(&mut self) {
        if let Some(state) = self.config.prefill {
            let filled = self.store.fill_missing(&self.lattice, state);
            log::debug!("prefilled {} cells with {}", filled, state);
        }
    }

    /// Session configuration
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The grid geometry
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The lattice, in lattice order
    pub fn lattice(&self) -> &[Cell] {
        &self.lattice
    }

    /// Current cell states
    pub fn store(&self) -> &CellStateStore {
        &self.store
    }

    /// Current search marker
    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    /// Current map view
    pub fn view(&self) -> MapView {
        self.view
    }

    /// Read-only view of the session for a renderer
    pub fn scene(&self) -> MapScene<'_> {
        MapScene {
            cells: &self.lattice,
            store: &self.store,
            marker: self.marker.as_ref(),
            view: self.view,
        }
    }

    /// Draw the session with `renderer`
    pub fn render<R: MapRenderer>(&self, renderer: &R) -> Result<R::Output> {
        renderer.render(&self.scene())
    }

    /// Mark one lattice cell, returning its previous state
    ///
    /// Addresses that are not cells of this session's lattice are rejected.
    pub fn set_cell(&mut self, address: CellAddress, state: CellState) -> Result<CellState> {
        if !self.grid.contains_address(&address) {
            return Err(Error::InvalidArgument(format!(
                "{} is not a cell of this grid",
                address
            )));
        }
        Ok(self.store.set_state(address, state))
    }

    /// Mark the rectangle spanned by two corners, returning the cell count
    ///
    /// Both corners must lie inside the region.
    pub fn mark_range(&mut self, a: LatLon, b: LatLon, state: CellState) -> Result<usize> {
        let region = self.grid.region();
        for corner in [a, b] {
            if !corner.is_finite() || !region.contains_point(corner) {
                return Err(Error::InvalidArgument(format!(
                    "corner {} is outside the region {}",
                    corner, region
                )));
            }
        }

        let addresses = self.grid.resolve_range(a, b)?;
        Ok(self.store.set_range(&addresses, state))
    }

    /// Bulk-mark a list of addresses
    pub fn seed(&mut self, addresses: &[CellAddress], state: CellState) -> usize {
        self.store.seed(addresses, state)
    }

    /// Write the cell states to the configured snapshot path
    pub fn save(&self) -> Result<()> {
        save_snapshot(&self.config.snapshot_path, &self.store.save())
    }

    /// Replace the cell states with the configured snapshot's contents
    ///
    /// On any failure the current states are kept.
    pub fn load(&mut self) -> Result<usize> {
        let snapshot = load_snapshot(&self.config.snapshot_path)?;
        self.store.load(snapshot);
        Ok(self.store.len())
    }

    /// Remove every mark, then apply the configured prefill again
    pub fn clear(&mut self) {
        self.store.clear_all();
        self.prefill();
    }

    /// Look up a place; on success move the marker there and zoom in
    ///
    /// Cell states are never touched, whatever the result.
    pub fn search(&mut self, query: &str) -> Result<Place> {
        let search = self
            .search
            .as_ref()
            .ok_or_else(|| Error::collaborator("no geocoder configured"))?;

        match search.search(query)? {
            SearchOutcome::Found(place) => {
                self.marker = Some(Marker {
                    position: place.position(),
                    label: place.display_address.clone(),
                });
                self.view = MapView {
                    center: place.position(),
                    zoom: self.config.search_zoom,
                };
                Ok(place)
            }
            SearchOutcome::NotFound => Err(Error::NotFound(format!(
                "Location not found in {}",
                self.config.locale
            ))),
        }
    }

    /// Apply a user action and report the result
    ///
    /// Failures come back as error or warning notices; the session stays
    /// usable and its cell states are unchanged by a failed command.
    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::SetCell { address, state } => match self.set_cell(address.clone(), state) {
                Ok(_) => Outcome::changed(
                    NoticeLevel::Success,
                    format!("Colored grid {} {}", address, state),
                ),
                Err(e) => Outcome::unchanged(NoticeLevel::Error, e.to_string()),
            },
            Command::MarkRange { a, b, state } => match self.mark_range(a, b, state) {
                Ok(count) => Outcome {
                    notice: Notice::new(
                        NoticeLevel::Success,
                        format!("Marked {} grid cells {}", count, state),
                    ),
                    changed: count > 0,
                },
                Err(e) => Outcome::unchanged(NoticeLevel::Error, e.to_string()),
            },
            Command::Seed { addresses, state } => {
                let count = self.seed(&addresses, state);
                Outcome::changed(
                    NoticeLevel::Info,
                    format!("Seeded {} grid cells {}", count, state),
                )
            }
            Command::Save => match self.save() {
                Ok(()) => {
                    Outcome::unchanged(NoticeLevel::Success, "Grid colors saved successfully!")
                }
                Err(e) => Outcome::unchanged(
                    NoticeLevel::Error,
                    format!("Error saving grid colors: {}", e),
                ),
            },
            Command::Load => match self.load() {
                Ok(_) => Outcome::changed(NoticeLevel::Success, "Grid colors loaded successfully!"),
                Err(Error::NotFound(_)) => {
                    Outcome::unchanged(NoticeLevel::Warning, "No saved grid colors found!")
                }
                Err(e) => Outcome::unchanged(
                    NoticeLevel::Error,
                    format!("Error loading grid colors: {}", e),
                ),
            },
            Command::Clear => {
                self.clear();
                Outcome::changed(NoticeLevel::Info, "Cleared all colors")
            }
            Command::Search { query } => match self.search(&query) {
                Ok(place) => Outcome::changed(NoticeLevel::Success, place.display_address),
                Err(Error::NotFound(message)) => Outcome::unchanged(NoticeLevel::Error, message),
                Err(e) => Outcome::unchanged(
                    NoticeLevel::Error,
                    format!("Error searching location: {}", e),
                ),
            },
        }
    }
}

impl fmt::Debug for GridSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridSession")
            .field("config", &self.config)
            .field("cells", &self.lattice.len())
            .field("marked", &self.store.len())
            .field("marker", &self.marker)
            .field("view", &self.view)
            .field("search", &self.search.is_some())
            .finish()
    }
}
