//! Store collaborators
//!
//! The grid engine reaches persistent data only through these traits. Every
//! operation is keyed by opaque ids and returns a payload or a typed
//! [`StoreError`]. [`MemoryStore`] is the in-process implementation used by
//! the binary and the tests.

mod memory;
mod synthetic;

pub use memory::{FailurePlan, MemoryStore};
pub use synthetic::SyntheticData;

use std::collections::BTreeSet;

use crate::model::table::{Cell, CellId, Column, ColumnId, ColumnType, RowId, TableData, TableId};
use crate::model::view::{Filter, Sort, View, ViewId};
use crate::query::QueryDescription;

/// How a failure should reach the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Rejected input; handled where it was entered
    Validation,
    /// Missing or foreign entity; shown as a blocking message
    Blocking,
    /// Request failure; rolled back and reported as a diagnostic
    Transient,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} not found or you don't have access to it ({id})")]
    NotFound { entity: &'static str, id: String },
    #[error("not authorized to access {0}")]
    Unauthorized(String),
    #[error("No view found for table {0}")]
    NoDefaultView(TableId),
    #[error("{0}")]
    Validation(String),
    #[error("request failed: {0}")]
    Request(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StoreError::Validation(_) => ErrorSeverity::Validation,
            StoreError::NotFound { .. }
            | StoreError::Unauthorized(_)
            | StoreError::NoDefaultView(_) => ErrorSeverity::Blocking,
            StoreError::Request(_) => ErrorSeverity::Transient,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Row/column/cell operations
pub trait TableStore: Send + Sync {
    /// Columns (by position) and rows as resolved through the view's query.
    /// Hidden columns are still returned; the caller excludes them.
    fn get_table_data(&self, table_id: TableId, view_id: ViewId) -> StoreResult<TableData>;

    fn add_row(&self, table_id: TableId) -> StoreResult<RowId>;

    /// Insert `count` rows filled with synthetic values; returns rows added
    fn add_rows(&self, table_id: TableId, count: usize) -> StoreResult<usize>;

    fn add_column(&self, table_id: TableId) -> StoreResult<Column>;

    fn delete_column(&self, column_id: ColumnId) -> StoreResult<()>;

    fn update_column(
        &self,
        column_id: ColumnId,
        name: Option<&str>,
        column_type: Option<ColumnType>,
    ) -> StoreResult<Column>;

    /// Write a cell from its text form; returns the authoritative cell
    fn update_cell(
        &self,
        cell_id: CellId,
        value: &str,
        column_type: ColumnType,
    ) -> StoreResult<Cell>;

    fn delete_row(&self, row_id: RowId) -> StoreResult<()>;
}

/// View and filter/sort sub-entity operations
pub trait ViewStore: Send + Sync {
    fn create_view(&self, table_id: TableId, name: &str) -> StoreResult<View>;

    fn get_view(&self, view_id: ViewId) -> StoreResult<View>;

    /// Views of a table, earliest first
    fn list_views(&self, table_id: TableId) -> StoreResult<Vec<View>>;

    fn rename_view(&self, view_id: ViewId, name: &str) -> StoreResult<View>;

    fn delete_view(&self, view_id: ViewId) -> StoreResult<()>;

    /// The earliest-created view of a table
    fn resolve_default_view(&self, table_id: TableId) -> StoreResult<View>;

    fn replace_filters(&self, view_id: ViewId, filters: Vec<Filter>) -> StoreResult<()>;

    fn replace_sorts(&self, view_id: ViewId, sorts: Vec<Sort>) -> StoreResult<()>;

    fn set_search_query(&self, view_id: ViewId, query: &str) -> StoreResult<()>;

    fn set_hidden_columns(&self, view_id: ViewId, hidden: &BTreeSet<ColumnId>)
        -> StoreResult<()>;

    /// Persist a composed query as the view's filters, sorts and search
    fn save_query(&self, view_id: ViewId, query: &QueryDescription) -> StoreResult<()> {
        self.replace_filters(view_id, query.to_filters())?;
        self.replace_sorts(view_id, query.to_sorts())?;
        self.set_search_query(view_id, &query.search_query)
    }

    fn add_filter(&self, view_id: ViewId, filter: Filter) -> StoreResult<usize> {
        let mut filters = self.get_view(view_id)?.filters;
        filters.push(filter);
        let index = filters.len() - 1;
        self.replace_filters(view_id, filters)?;
        Ok(index)
    }

    fn remove_filter(&self, view_id: ViewId, index: usize) -> StoreResult<Filter> {
        let mut filters = self.get_view(view_id)?.filters;
        if index >= filters.len() {
            return Err(StoreError::not_found("filter", index));
        }
        let removed = filters.remove(index);
        self.replace_filters(view_id, filters)?;
        Ok(removed)
    }

    fn add_sort(&self, view_id: ViewId, sort: Sort) -> StoreResult<usize> {
        let mut sorts = self.get_view(view_id)?.sorts;
        sorts.push(sort);
        let index = sorts.len() - 1;
        self.replace_sorts(view_id, sorts)?;
        Ok(index)
    }

    fn remove_sort(&self, view_id: ViewId, index: usize) -> StoreResult<Sort> {
        let mut sorts = self.get_view(view_id)?.sorts;
        if index >= sorts.len() {
            return Err(StoreError::not_found("sort", index));
        }
        let removed = sorts.remove(index);
        self.replace_sorts(view_id, sorts)?;
        Ok(removed)
    }
}

/// Everything the runtime needs from a backing store
pub trait GridStore: TableStore + ViewStore {}

impl<T: TableStore + ViewStore> GridStore for T {}
