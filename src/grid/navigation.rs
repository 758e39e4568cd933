//! Cell navigation targets
//!
//! Every move is clamped to the grid. A move that would leave the grid is
//! absorbed: the target is `None` and the active cell stays put. Tab and
//! Shift+Tab step one column right/left and do not wrap to another row.

use super::address::{CellAddressMap, CellPosition};

/// A navigation request from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavMove {
    Up,
    Down,
    Left,
    Right,
    /// Tab
    NextCell,
    /// Shift+Tab
    PrevCell,
    /// Home
    RowStart,
    /// End
    RowEnd,
    /// Ctrl+Home
    FirstCell,
    /// Ctrl+End
    LastCell,
    PageUp,
    PageDown,
}

/// Where `mv` lands from `from`, or `None` when the move is absorbed
pub fn target(
    from: CellPosition,
    mv: NavMove,
    address: &CellAddressMap,
    page_rows: usize,
) -> Option<CellPosition> {
    if address.is_empty() {
        return None;
    }
    let last_row = address.row_count() - 1;
    let last_col = address.column_count() - 1;
    let page = page_rows.max(1);

    let (row, col) = match mv {
        NavMove::Up => (from.row.checked_sub(1)?, from.col),
        NavMove::Down => (from.row + 1, from.col),
        NavMove::Left | NavMove::PrevCell => (from.row, from.col.checked_sub(1)?),
        NavMove::Right | NavMove::NextCell => (from.row, from.col + 1),
        NavMove::RowStart => (from.row, 0),
        NavMove::RowEnd => (from.row, last_col),
        NavMove::FirstCell => (0, 0),
        NavMove::LastCell => (last_row, last_col),
        NavMove::PageUp => (from.row.saturating_sub(page), from.col),
        NavMove::PageDown => ((from.row + page).min(last_row), from.col),
    };

    if row > last_row || col > last_col {
        return None;
    }
    let to = CellPosition::new(row, col);
    (to != from).then_some(to)
}
