//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::grid::{CellPosition, GridKey};
use crate::model::context::BaseContext;
use crate::model::table::{Cell, CellId, ColumnId, ColumnType, RowId, TableData};
use crate::model::view::{FilterOperator, SortDirection};
use crate::store::StoreError;

/// Pointer and keyboard input aimed at the grid
#[derive(Debug, Clone, PartialEq)]
pub enum GridMsg {
    /// Click on a cell
    Click(CellPosition),
    /// Click anywhere outside the grid's bounds
    ClickOutside,
    /// The editing input lost focus
    Blur,
    /// Key pressed while the grid has focus
    Key(GridKey),
    /// Replace the whole edit draft (paste into the input, IME commit)
    SetDraft(String),
    /// Show or hide a column in the current view
    ToggleColumnHidden(ColumnId),
    /// A rendered row reported its real height
    MeasureRow { index: usize, height: f64 },
}

/// Filter, sort and search editing
#[derive(Debug, Clone, PartialEq)]
pub enum QueryMsg {
    // === Filters ===
    AddFilter,
    RemoveFilter(usize),
    SetFilterColumn { index: usize, column_id: ColumnId },
    SetFilterOperator { index: usize, operator: FilterOperator },
    SetFilterValue { index: usize, value: String },
    /// Store complete filter entries on the view and submit
    ApplyFilters,
    ClearFilters,

    // === Sorts ===
    AddSort(Option<ColumnId>),
    RemoveSort(usize),
    SetSortColumn { index: usize, column_id: ColumnId },
    SetSortDirection { index: usize, direction: SortDirection },
    MoveSortUp(usize),
    MoveSortDown(usize),
    ApplySorts,
    ClearSorts,

    // === Search ===
    /// Search box text changed
    SearchInput(String),
    /// Debounce interval elapsed for this revision
    SearchSettled { revision: u64 },
    /// The store answered the in-flight query submission
    Submitted(Result<TableData, StoreError>),
}

/// Cell commit results
#[derive(Debug, Clone, PartialEq)]
pub enum SyncMsg {
    CellUpdated {
        request_id: u64,
        cell_id: CellId,
        result: Result<Cell, StoreError>,
    },
}

/// Bulk insertion progress
#[derive(Debug, Clone, PartialEq)]
pub enum BulkMsg {
    Start {
        total_batches: usize,
        rows_per_batch: usize,
    },
    BatchCompleted {
        batch: usize,
        result: Result<usize, StoreError>,
    },
}

/// Data loading, layout and table structure
#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    /// Reload the open view from the store
    Refresh,
    /// Table data fetch completed
    TableDataLoaded(Result<TableData, StoreError>),
    /// Viewport height changed
    Resize { height: f64 },
    /// Scroll by a pixel delta (positive = down)
    Scroll(f64),
    /// Scroll to an absolute pixel offset
    ScrollTo(f64),
    /// Navigated into a base
    EnterBase(BaseContext),
    /// Navigated away from the base
    LeaveBase,
    AddRow,
    DeleteRow(RowId),
    AddColumn,
    DeleteColumn(ColumnId),
    UpdateColumn {
        column_id: ColumnId,
        name: Option<String>,
        column_type: Option<ColumnType>,
    },
    /// A structural operation finished
    TableChanged {
        operation: &'static str,
        result: Result<(), StoreError>,
    },
    /// Hidden column set persisted (or not)
    HiddenColumnsSaved(Result<(), StoreError>),
    /// Clear the blocking error message
    DismissError,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Grid input (selection, editing, navigation)
    Grid(GridMsg),
    /// Query builder and search
    Query(QueryMsg),
    /// Cell commit results
    Sync(SyncMsg),
    /// Bulk insertion
    Bulk(BulkMsg),
    /// App messages (data, layout, base context)
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn key(key: GridKey) -> Self {
        Msg::Grid(GridMsg::Key(key))
    }

    pub fn click(row: usize, col: usize) -> Self {
        Msg::Grid(GridMsg::Click(CellPosition { row, col }))
    }

    pub fn search(text: impl Into<String>) -> Self {
        Msg::Query(QueryMsg::SearchInput(text.into()))
    }

    pub fn resize(height: f64) -> Self {
        Msg::App(AppMsg::Resize { height })
    }
}
