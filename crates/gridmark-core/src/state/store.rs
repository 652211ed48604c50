//! Cell state storage
//!
//! Sparse storage of cell marks. Only marked cells are stored; a missing
//! address reads as [`CellState::Unset`], and setting a cell to `Unset`
//! removes its entry.

use std::collections::BTreeMap;

use super::CellState;
use crate::geometry::{Cell, CellAddress};

/// A detached copy of a store's contents, ordered by address
///
/// Snapshots are what gets persisted. Building one from entries keeps the
/// last state given for a repeated address.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Snapshot {
    entries: BTreeMap<CellAddress, CellState>,
}

impl Snapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from address/state pairs
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (CellAddress, CellState)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the snapshot has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// State recorded for an address, if any
    pub fn get(&self, address: &CellAddress) -> Option<CellState> {
        self.entries.get(address).copied()
    }

    /// Iterate over entries in address order
    pub fn iter(&self) -> impl Iterator<Item = (&CellAddress, CellState)> + '_ {
        self.entries.iter().map(|(addr, state)| (addr, *state))
    }
}

impl IntoIterator for Snapshot {
    type Item = (CellAddress, CellState);
    type IntoIter = std::collections::btree_map::IntoIter<CellAddress, CellState>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(CellAddress, CellState)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (CellAddress, CellState)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

/// The mapping from cell address to cell state
///
/// Mutations never fail. The store owns its data exclusively; callers get
/// copies through [`CellStateStore::save`] and replace the contents wholesale
/// through [`CellStateStore::load`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellStateStore {
    states: BTreeMap<CellAddress, CellState>,
}

impl CellStateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the state of one cell, returning its previous state
    pub fn set_state(&mut self, address: CellAddress, state: CellState) -> CellState {
        let previous = if state.is_unset() {
            self.states.remove(&address)
        } else {
            self.states.insert(address, state)
        };
        previous.unwrap_or_default()
    }

    /// Set every address in `addresses` to `state`
    ///
    /// Returns the number of addresses touched. Applying the same range and
    /// state twice leaves the store as it was after the first call.
    pub fn set_range<'a, I>(&mut self, addresses: I, state: CellState) -> usize
    where
        I: IntoIterator<Item = &'a CellAddress>,
    {
        let mut touched = 0;
        for address in addresses {
            self.set_state(address.clone(), state);
            touched += 1;
        }
        log::debug!("set {} cells to {}", touched, state);
        touched
    }

    /// Get the state of a cell (`Unset` if never marked)
    pub fn get_state(&self, address: &CellAddress) -> CellState {
        self.states.get(address).copied().unwrap_or_default()
    }

    /// Remove every mark
    pub fn clear_all(&mut self) {
        log::debug!("clearing {} marked cells", self.states.len());
        self.states.clear();
    }

    /// Bulk-apply `state` to a list of addresses; duplicates are harmless
    pub fn seed<'a, I>(&mut self, addresses: I, state: CellState) -> usize
    where
        I: IntoIterator<Item = &'a CellAddress>,
    {
        self.set_range(addresses, state)
    }

    /// Give every cell without a mark the state `state`
    ///
    /// Existing marks are kept. Returns the number of cells filled.
    pub fn fill_missing<'a, I>(&mut self, cells: I, state: CellState) -> usize
    where
        I: IntoIterator<Item = &'a Cell>,
    {
        if state.is_unset() {
            return 0;
        }

        let mut filled = 0;
        for cell in cells {
            if !self.states.contains_key(&cell.address) {
                self.states.insert(cell.address.clone(), state);
                filled += 1;
            }
        }
        filled
    }

    /// Number of marked cells
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check if no cell is marked
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterate over marked cells in address order
    pub fn iter(&self) -> impl Iterator<Item = (&CellAddress, CellState)> + '_ {
        self.states.iter().map(|(addr, state)| (addr, *state))
    }

    /// Count marked cells per state
    pub fn count_by_state(&self) -> BTreeMap<CellState, usize> {
        let mut counts = BTreeMap::new();
        for state in self.states.values() {
            *counts.entry(*state).or_insert(0) += 1;
        }
        counts
    }

    /// Copy the whole mapping into a snapshot
    pub fn save(&self) -> Snapshot {
        Snapshot {
            entries: self.states.clone(),
        }
    }

    /// Replace the whole mapping with the contents of `snapshot`
    ///
    /// Unset entries in the snapshot are dropped, matching how the store
    /// treats them on `set_state`.
    pub fn load(&mut self, snapshot: Snapshot) {
        self.states = snapshot
            .entries
            .into_iter()
            .filter(|(_, state)| !state.is_unset())
            .collect();
        log::debug!("loaded {} marked cells", self.states.len());
    }
}

impl From<Snapshot> for CellStateStore {
    fn from(snapshot: Snapshot) -> Self {
        let mut store = Self::new();
        store.load(snapshot);
        store
    }
}
