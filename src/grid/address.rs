//! Cell addressing: (row index, visible column index) <-> cell id
//!
//! Built from the currently materialized rows and the position-ordered list
//! of non-hidden columns. Out-of-range lookups return `None`; callers treat
//! that as a no-op.

use std::collections::{BTreeSet, HashMap};

use crate::model::table::{CellId, CellValue, Column, ColumnId, TableData};

/// Position of a cell in the grid as currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Lookup tables for one materialized grid
#[derive(Debug, Clone, Default)]
pub struct CellAddressMap {
    columns: Vec<Column>,
    /// `grid[row][col]`; `None` where a row lacks a cell for a column
    grid: Vec<Vec<Option<CellId>>>,
    index: HashMap<CellId, CellPosition>,
}

impl CellAddressMap {
    pub fn build(data: &TableData, hidden: &BTreeSet<ColumnId>) -> Self {
        let mut columns: Vec<Column> = data
            .columns
            .iter()
            .filter(|c| !hidden.contains(&c.id))
            .cloned()
            .collect();
        columns.sort_by_key(|c| c.position);

        let mut index = HashMap::new();
        let grid = data
            .rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(col_idx, column)| {
                        let id = row.cell_for(column.id).map(|c| c.id);
                        if let Some(id) = id {
                            index.insert(id, CellPosition::new(row_idx, col_idx));
                        }
                        id
                    })
                    .collect()
            })
            .collect();

        Self {
            columns,
            grid,
            index,
        }
    }

    /// Cell at a position, if both indices are in bounds
    pub fn resolve(&self, row: usize, col: usize) -> Option<CellId> {
        self.grid.get(row)?.get(col).copied().flatten()
    }

    /// Current position of a cell, if it is materialized and visible
    pub fn locate(&self, cell_id: CellId) -> Option<CellPosition> {
        self.index.get(&cell_id).copied()
    }

    pub fn row_count(&self) -> usize {
        self.grid.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty() || self.columns.is_empty()
    }

    pub fn visible_columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_at(&self, col: usize) -> Option<&Column> {
        self.columns.get(col)
    }

    /// Clamp a position into the grid; `None` for an empty grid
    pub fn clamp(&self, row: usize, col: usize) -> Option<CellPosition> {
        if self.is_empty() {
            return None;
        }
        Some(CellPosition::new(
            row.min(self.row_count() - 1),
            col.min(self.column_count() - 1),
        ))
    }
}

/// Read-only view of loaded data the state machine consults
pub struct GridLookup<'a> {
    pub address: &'a CellAddressMap,
    pub data: &'a TableData,
    /// Rows in one viewport page, used for PageUp/PageDown
    pub page_rows: usize,
}

impl GridLookup<'_> {
    /// Display text of a cell (the edit draft seed)
    pub fn display_value(&self, cell_id: CellId) -> String {
        self.data
            .cell_value(cell_id)
            .map(|v| v.display())
            .unwrap_or_default()
    }

    pub fn value(&self, cell_id: CellId) -> Option<CellValue> {
        self.data.cell_value(cell_id)
    }
}
