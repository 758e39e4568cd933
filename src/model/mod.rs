//! Application model - the complete state of the grid engine
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod context;
pub mod table;
pub mod ui;
pub mod view;

pub use context::{BaseColor, BaseContext};
pub use table::{
    Cell, CellId, CellValue, Column, ColumnId, ColumnType, Row, RowId, TableData, TableId,
    ValidationError,
};
pub use ui::{Diagnostic, UiState};
pub use view::{Filter, FilterOperator, Sort, SortDirection, View, ViewId};

use crate::bulk::BulkInserter;
use crate::commands::Cmd;
use crate::config::GridConfig;
use crate::grid::{GridLookup, GridState, RowWindower};
use crate::query::{compose_view, QueryState};
use crate::sync::CellSynchronizer;

/// The complete application model for one open view
#[derive(Debug, Clone)]
pub struct AppModel {
    pub config: GridConfig,
    pub table_id: TableId,
    /// The open view with its applied filters, sorts and search
    pub view: View,
    /// Rows and columns as last loaded, plus optimistic edits
    pub data: TableData,
    /// Cursor, addressing and windowing
    pub grid: GridState,
    /// Builder drafts and debounced search
    pub query: QueryState,
    pub sync: CellSynchronizer,
    pub bulk: BulkInserter,
    pub ui: UiState,
    /// Base currently being viewed, passed explicitly to rendering
    pub base: Option<BaseContext>,
    /// A fetch is outstanding
    pub loading: bool,
}

impl AppModel {
    pub fn new(config: GridConfig, table_id: TableId, view: View) -> Self {
        let config = config.sanitized();
        let mut windower = RowWindower::new(config.row_height_estimate, config.overscan);
        windower.set_viewport_height(config.viewport_height);

        let mut query = QueryState::new(config.search_debounce_ms);
        query.load_view(&view, &[]);

        Self {
            bulk: BulkInserter::new(config.bulk_batch_delay_ms),
            config,
            table_id,
            view,
            data: TableData::default(),
            grid: GridState::new(windower),
            query,
            sync: CellSynchronizer::new(),
            ui: UiState::new(),
            base: None,
            loading: false,
        }
    }

    /// Command reloading the open view
    pub fn fetch_cmd(&mut self) -> Cmd {
        self.loading = true;
        Cmd::FetchTableData {
            table_id: self.table_id,
            view_id: self.view.id,
        }
    }

    /// Adopt freshly loaded data: revalidate drafts against the new columns,
    /// rebuild addressing and re-anchor the cursor
    pub fn load_data(&mut self, data: TableData) {
        self.loading = false;
        let gone: Vec<_> = self
            .view
            .filters
            .iter()
            .filter_map(|f| f.column_id)
            .chain(self.view.sorts.iter().filter_map(|s| s.column_id))
            .chain(self.view.hidden_column_ids.iter().copied())
            .filter(|id| data.column(*id).is_none())
            .collect();
        for column_id in gone {
            self.view.forget_column(column_id);
        }
        self.query.filters.revalidate(&data.columns);
        self.query.sorts.revalidate(&data.columns);
        self.query.last_submitted = Some(compose_view(&self.view, &data.columns));
        self.data = data;
        self.grid.windower.clear_measurements();
        self.rebuild_grid();
        tracing::info!(
            "loaded {} rows x {} columns for view '{}'",
            self.data.row_count(),
            self.data.columns.len(),
            self.view.name
        );
    }

    /// Rebuild the address map after data or visibility changed
    pub fn rebuild_grid(&mut self) {
        self.grid.rebuild(&self.data, &self.view.hidden_column_ids);
    }

    pub fn lookup(&self) -> GridLookup<'_> {
        GridLookup {
            address: &self.grid.address,
            data: &self.data,
            page_rows: self.grid.windower.page_rows(),
        }
    }

    /// Column type of a loaded cell
    pub fn column_type_of(&self, cell_id: CellId) -> Option<ColumnType> {
        let cell = self.data.find_cell(cell_id)?;
        self.data.column(cell.column_id).map(|c| c.column_type)
    }
}
