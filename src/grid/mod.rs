//! Grid interaction core
//!
//! Addressing, cursor state machine, navigation and row windowing for the
//! spreadsheet grid.
//!
//! # Architecture
//!
//! ```text
//! GridState
//! ├── CellAddressMap  (row/col <-> cell id over visible columns)
//! ├── CursorState     (Idle | Selected | Editing)
//! └── RowWindower     (visible range + overscan, offsets)
//! ```

mod address;
mod cursor;
mod navigation;
mod viewport;

pub use address::{CellAddressMap, CellPosition, GridLookup};
pub use cursor::{
    reconcile, transition, ActiveCell, CommitRequest, CursorEvent, CursorState, GridKey,
    Transition,
};
pub use navigation::{target as navigation_target, NavMove};
pub use viewport::{RowWindow, RowWindower, VirtualRow, DEFAULT_OVERSCAN, DEFAULT_ROW_HEIGHT};

use std::collections::BTreeSet;

use crate::model::table::{ColumnId, TableData};

/// Grid-side state for the open view
#[derive(Debug, Clone, Default)]
pub struct GridState {
    pub address: CellAddressMap,
    pub cursor: CursorState,
    pub windower: RowWindower,
}

impl GridState {
    pub fn new(windower: RowWindower) -> Self {
        Self {
            address: CellAddressMap::default(),
            cursor: CursorState::Idle,
            windower,
        }
    }

    /// Rebuild addressing after data or column visibility changed, then
    /// re-anchor the cursor and resize the window.
    pub fn rebuild(&mut self, data: &TableData, hidden: &BTreeSet<ColumnId>) {
        self.address = CellAddressMap::build(data, hidden);
        self.windower.set_row_count(self.address.row_count());
        let lookup = GridLookup {
            address: &self.address,
            data,
            page_rows: self.windower.page_rows(),
        };
        let before = self.cursor.name();
        self.cursor = reconcile(&self.cursor, &lookup);
        if before != self.cursor.name() {
            tracing::debug!("cursor reset {} -> {} after rebuild", before, self.cursor.name());
        }
    }

    /// Run one state machine step against loaded data
    pub fn apply(&mut self, event: CursorEvent, data: &TableData) -> Option<CommitRequest> {
        let lookup = GridLookup {
            address: &self.address,
            data,
            page_rows: self.windower.page_rows(),
        };
        let Transition { state, commit } = transition(&self.cursor, event, &lookup);
        self.cursor = state;
        if let Some(active) = self.cursor.active_cell() {
            self.windower.scroll_to_row(active.row_index());
        }
        commit
    }
}
