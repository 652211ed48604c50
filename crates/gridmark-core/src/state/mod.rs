//! Cell state types
//!
//! This module contains:
//! - [`CellState`] - The categorical mark applied to a cell
//! - [`CellStateStore`] - The address → state overlay owned by a session
//! - [`Snapshot`] - A detached, ordered copy of a store's contents

mod cell_state;
mod store;

pub use cell_state::CellState;
pub use store::{CellStateStore, Snapshot};
