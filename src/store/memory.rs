//! In-process store backing the binary and the tests

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use super::{StoreError, StoreResult, SyntheticData, TableStore, ViewStore};
use crate::model::table::{
    format_number, parse_number, Cell, CellId, CellValue, Column, ColumnId, ColumnType, Row,
    RowId, TableData, TableId, ValidationError,
};
use crate::model::view::{Filter, Sort, View, ViewId};
use crate::query::{compose_view, execute, QueryDescription};

/// Maximum view name length in characters
pub const MAX_VIEW_NAME: usize = 255;

/// Name given to the view created alongside a new table
pub const DEFAULT_VIEW_NAME: &str = "Grid view";

/// Name given to columns created by `add_column`
pub const NEW_COLUMN_NAME: &str = "New Column";

/// Scripted failures, consumed as matching calls arrive
#[derive(Debug, Clone, Default)]
pub struct FailurePlan {
    /// Fail the `add_rows` call with this 1-based sequence number
    add_rows: Option<(usize, StoreError)>,
    update_cell: VecDeque<StoreError>,
    get_table_data: VecDeque<StoreError>,
    /// Hold `update_cell` writes of this raw value back for a while
    slow_update_cell: Option<(String, Duration)>,
}

impl FailurePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_add_rows_call(mut self, call: usize, error: StoreError) -> Self {
        self.add_rows = Some((call, error));
        self
    }

    pub fn fail_next_update_cell(mut self, error: StoreError) -> Self {
        self.update_cell.push_back(error);
        self
    }

    pub fn fail_next_fetch(mut self, error: StoreError) -> Self {
        self.get_table_data.push_back(error);
        self
    }

    pub fn slow_update_cell(mut self, value: impl Into<String>, delay: Duration) -> Self {
        self.slow_update_cell = Some((value.into(), delay));
        self
    }
}

#[derive(Debug)]
struct TableRecord {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl TableRecord {
    fn empty_row(&self) -> Row {
        Row {
            id: RowId::new(),
            cells: self
                .columns
                .iter()
                .map(|col| {
                    let value = match col.column_type {
                        ColumnType::Text => CellValue::Text(Some(String::new())),
                        ColumnType::Number => CellValue::Number(None),
                    };
                    Cell::new(col.id, value)
                })
                .collect(),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    tables: HashMap<TableId, TableRecord>,
    views: HashMap<ViewId, View>,
    view_seq: u64,
    synthetic: SyntheticData,
    failures: FailurePlan,
    add_rows_calls: usize,
    update_cell_calls: usize,
}

impl Inner {
    fn table(&self, table_id: TableId) -> StoreResult<&TableRecord> {
        self.tables
            .get(&table_id)
            .ok_or_else(|| StoreError::not_found("Table", table_id))
    }

    fn table_mut(&mut self, table_id: TableId) -> StoreResult<&mut TableRecord> {
        self.tables
            .get_mut(&table_id)
            .ok_or_else(|| StoreError::not_found("Table", table_id))
    }

    fn view_mut(&mut self, view_id: ViewId) -> StoreResult<&mut View> {
        self.views
            .get_mut(&view_id)
            .ok_or_else(|| StoreError::not_found("View", view_id))
    }

    fn table_of_column(&self, column_id: ColumnId) -> StoreResult<TableId> {
        self.tables
            .iter()
            .find(|(_, t)| t.columns.iter().any(|c| c.id == column_id))
            .map(|(id, _)| *id)
            .ok_or_else(|| StoreError::not_found("Column", column_id))
    }

    fn next_view(&mut self, table_id: TableId, name: &str) -> StoreResult<View> {
        let name = validate_view_name(name)?;
        self.table(table_id)?;
        let view = View::new(table_id, name, self.view_seq);
        self.view_seq += 1;
        self.views.insert(view.id, view.clone());
        Ok(view)
    }
}

fn validate_view_name(name: &str) -> StoreResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(validation(ValidationError::Empty("View name")));
    }
    if name.chars().count() > MAX_VIEW_NAME {
        return Err(validation(ValidationError::TooLong {
            field: "View name",
            max: MAX_VIEW_NAME,
        }));
    }
    Ok(name)
}

fn validation(err: ValidationError) -> StoreError {
    StoreError::Validation(err.to_string())
}

/// Tables and views held behind a single lock
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose synthetic rows are reproducible
    pub fn with_seed(seed: u64) -> Self {
        let store = Self::default();
        if let Ok(mut inner) = store.inner.lock() {
            inner.synthetic = SyntheticData::seeded(seed);
        }
        store
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Request("store lock poisoned".to_string()))
    }

    pub fn set_failure_plan(&self, plan: FailurePlan) -> StoreResult<()> {
        self.lock()?.failures = plan;
        Ok(())
    }

    /// Create a table with the default `Name`, `Age` and `Address` columns
    /// and its default view
    pub fn create_table(&self, name: &str) -> StoreResult<(TableId, View)> {
        self.create_table_with_columns(
            name,
            &[
                ("Name".to_string(), ColumnType::Text),
                ("Age".to_string(), ColumnType::Number),
                ("Address".to_string(), ColumnType::Text),
            ],
        )
    }

    pub fn create_table_with_columns(
        &self,
        name: &str,
        columns: &[(String, ColumnType)],
    ) -> StoreResult<(TableId, View)> {
        let name = name.trim();
        if name.is_empty() {
            return Err(validation(ValidationError::Empty("Table name")));
        }
        let mut inner = self.lock()?;
        let table_id = TableId::new();
        let columns = columns
            .iter()
            .enumerate()
            .map(|(i, (col_name, ty))| Column::new(col_name.clone(), *ty, i as u32))
            .collect();
        inner.tables.insert(
            table_id,
            TableRecord {
                name: name.to_string(),
                columns,
                rows: Vec::new(),
            },
        );
        let view = inner.next_view(table_id, DEFAULT_VIEW_NAME)?;
        tracing::debug!("created table '{}' ({})", name, table_id);
        Ok((table_id, view))
    }

    pub fn table_name(&self, table_id: TableId) -> StoreResult<String> {
        Ok(self.lock()?.table(table_id)?.name.clone())
    }

    /// Total rows in a table, ignoring any view query
    pub fn row_count(&self, table_id: TableId) -> StoreResult<usize> {
        Ok(self.lock()?.table(table_id)?.rows.len())
    }

    pub fn add_rows_calls(&self) -> usize {
        self.lock().map(|i| i.add_rows_calls).unwrap_or(0)
    }

    pub fn update_cell_calls(&self) -> usize {
        self.lock().map(|i| i.update_cell_calls).unwrap_or(0)
    }
}

impl TableStore for MemoryStore {
    fn get_table_data(&self, table_id: TableId, view_id: ViewId) -> StoreResult<TableData> {
        let mut inner = self.lock()?;
        if let Some(err) = inner.failures.get_table_data.pop_front() {
            return Err(err);
        }
        let view = inner
            .views
            .get(&view_id)
            .filter(|v| v.table_id == table_id)
            .ok_or_else(|| StoreError::not_found("View", view_id))?;
        let table = inner.table(table_id)?;
        let data = TableData {
            columns: table.columns.clone(),
            rows: table.rows.clone(),
        };
        let query = compose_view(view, &data.columns);
        Ok(execute(&data, &query))
    }

    fn add_row(&self, table_id: TableId) -> StoreResult<RowId> {
        let mut inner = self.lock()?;
        let table = inner.table_mut(table_id)?;
        let row = table.empty_row();
        let id = row.id;
        table.rows.push(row);
        Ok(id)
    }

    fn add_rows(&self, table_id: TableId, count: usize) -> StoreResult<usize> {
        let mut inner = self.lock()?;
        inner.add_rows_calls += 1;
        let call = inner.add_rows_calls;
        if matches!(&inner.failures.add_rows, Some((n, _)) if *n == call) {
            if let Some((_, err)) = inner.failures.add_rows.take() {
                return Err(err);
            }
        }

        let Inner {
            tables, synthetic, ..
        } = &mut *inner;
        let table = tables
            .get_mut(&table_id)
            .ok_or_else(|| StoreError::not_found("Table", table_id))?;
        if table.columns.is_empty() {
            return Err(StoreError::Validation("Table has no columns".to_string()));
        }
        table.rows.reserve(count);
        for _ in 0..count {
            let cells = table
                .columns
                .iter()
                .map(|col| Cell::new(col.id, synthetic.value_for(col)))
                .collect();
            table.rows.push(Row {
                id: RowId::new(),
                cells,
            });
        }
        Ok(count)
    }

    fn add_column(&self, table_id: TableId) -> StoreResult<Column> {
        let mut inner = self.lock()?;
        let table = inner.table_mut(table_id)?;
        let position = table
            .columns
            .iter()
            .map(|c| c.position + 1)
            .max()
            .unwrap_or(0);
        let column = Column::new(NEW_COLUMN_NAME, ColumnType::Text, position);
        for row in &mut table.rows {
            row.cells
                .push(Cell::new(column.id, CellValue::Text(Some(String::new()))));
        }
        table.columns.push(column.clone());
        Ok(column)
    }

    fn delete_column(&self, column_id: ColumnId) -> StoreResult<()> {
        let mut inner = self.lock()?;
        let table_id = inner.table_of_column(column_id)?;
        let table = inner.table_mut(table_id)?;
        table.columns.retain(|c| c.id != column_id);
        for row in &mut table.rows {
            row.cells.retain(|c| c.column_id != column_id);
        }
        for view in inner.views.values_mut().filter(|v| v.table_id == table_id) {
            view.forget_column(column_id);
        }
        Ok(())
    }

    fn update_column(
        &self,
        column_id: ColumnId,
        name: Option<&str>,
        column_type: Option<ColumnType>,
    ) -> StoreResult<Column> {
        if name.is_none() && column_type.is_none() {
            return Err(StoreError::Validation("No updates provided".to_string()));
        }
        if name.is_some_and(|n| n.trim().is_empty()) {
            return Err(validation(ValidationError::Empty("Column name")));
        }

        let mut inner = self.lock()?;
        let table_id = inner.table_of_column(column_id)?;
        let table = inner.table_mut(table_id)?;
        let Some(column) = table.columns.iter_mut().find(|c| c.id == column_id) else {
            return Err(StoreError::not_found("Column", column_id));
        };
        if let Some(name) = name {
            column.name = name.trim().to_string();
        }
        let converted = match column_type {
            Some(ty) if ty != column.column_type => {
                let from = column.column_type;
                column.column_type = ty;
                Some((from, ty))
            }
            _ => None,
        };
        let updated = column.clone();

        if let Some((from, to)) = converted {
            for cell in table
                .rows
                .iter_mut()
                .flat_map(|r| r.cells.iter_mut())
                .filter(|c| c.column_id == column_id)
            {
                let value = match (from, to) {
                    (ColumnType::Number, ColumnType::Text) => {
                        CellValue::Text(cell.value_number.map(format_number))
                    }
                    (ColumnType::Text, ColumnType::Number) => CellValue::Number(
                        cell.value_text
                            .as_deref()
                            .and_then(|t| parse_number(t).ok().flatten()),
                    ),
                    _ => cell.value(to),
                };
                cell.set_value(value);
            }
            tracing::debug!("converted column {} from {} to {}", column_id, from, to);
        }
        Ok(updated)
    }

    fn update_cell(
        &self,
        cell_id: CellId,
        value: &str,
        column_type: ColumnType,
    ) -> StoreResult<Cell> {
        let delay = self.lock()?.failures.slow_update_cell.as_ref().and_then(|(slow, delay)| {
            (slow == value).then_some(*delay)
        });
        if let Some(delay) = delay {
            thread::sleep(delay);
        }
        let mut inner = self.lock()?;
        inner.update_cell_calls += 1;
        if let Some(err) = inner.failures.update_cell.pop_front() {
            return Err(err);
        }
        let parsed = CellValue::parse(value, column_type).map_err(validation)?;
        let cell = inner
            .tables
            .values_mut()
            .flat_map(|t| t.rows.iter_mut())
            .flat_map(|r| r.cells.iter_mut())
            .find(|c| c.id == cell_id)
            .ok_or_else(|| StoreError::not_found("Cell", cell_id))?;
        cell.set_value(parsed);
        Ok(cell.clone())
    }

    fn delete_row(&self, row_id: RowId) -> StoreResult<()> {
        let mut inner = self.lock()?;
        for table in inner.tables.values_mut() {
            if let Some(index) = table.rows.iter().position(|r| r.id == row_id) {
                table.rows.remove(index);
                return Ok(());
            }
        }
        Err(StoreError::not_found("Row", row_id))
    }
}

impl ViewStore for MemoryStore {
    fn create_view(&self, table_id: TableId, name: &str) -> StoreResult<View> {
        self.lock()?.next_view(table_id, name)
    }

    fn get_view(&self, view_id: ViewId) -> StoreResult<View> {
        self.lock()?
            .views
            .get(&view_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("View", view_id))
    }

    fn list_views(&self, table_id: TableId) -> StoreResult<Vec<View>> {
        let inner = self.lock()?;
        inner.table(table_id)?;
        let mut views: Vec<View> = inner
            .views
            .values()
            .filter(|v| v.table_id == table_id)
            .cloned()
            .collect();
        views.sort_by_key(|v| v.created_seq);
        Ok(views)
    }

    fn rename_view(&self, view_id: ViewId, name: &str) -> StoreResult<View> {
        let name = validate_view_name(name)?;
        let mut inner = self.lock()?;
        let view = inner.view_mut(view_id)?;
        view.name = name.to_string();
        Ok(view.clone())
    }

    fn delete_view(&self, view_id: ViewId) -> StoreResult<()> {
        self.lock()?
            .views
            .remove(&view_id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("View", view_id))
    }

    fn resolve_default_view(&self, table_id: TableId) -> StoreResult<View> {
        self.lock()?
            .views
            .values()
            .filter(|v| v.table_id == table_id)
            .min_by_key(|v| v.created_seq)
            .cloned()
            .ok_or(StoreError::NoDefaultView(table_id))
    }

    fn replace_filters(&self, view_id: ViewId, filters: Vec<Filter>) -> StoreResult<()> {
        self.lock()?.view_mut(view_id)?.filters = filters;
        Ok(())
    }

    fn replace_sorts(&self, view_id: ViewId, sorts: Vec<Sort>) -> StoreResult<()> {
        self.lock()?.view_mut(view_id)?.sorts = sorts;
        Ok(())
    }

    fn set_search_query(&self, view_id: ViewId, query: &str) -> StoreResult<()> {
        self.lock()?.view_mut(view_id)?.search_query = query.to_string();
        Ok(())
    }

    fn set_hidden_columns(
        &self,
        view_id: ViewId,
        hidden: &BTreeSet<ColumnId>,
    ) -> StoreResult<()> {
        self.lock()?.view_mut(view_id)?.hidden_column_ids = hidden.clone();
        Ok(())
    }

    fn save_query(&self, view_id: ViewId, query: &QueryDescription) -> StoreResult<()> {
        let mut inner = self.lock()?;
        let view = inner.view_mut(view_id)?;
        view.filters = query.to_filters();
        view.sorts = query.to_sorts();
        view.search_query = query.search_query.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::view::{FilterOperator, SortDirection};

    fn store_with_table() -> (MemoryStore, TableId, View) {
        let store = MemoryStore::with_seed(3);
        let (table_id, view) = store.create_table("People").unwrap();
        (store, table_id, view)
    }

    #[test]
    fn test_new_table_has_default_columns_and_view() {
        let (store, table_id, view) = store_with_table();
        assert_eq!(view.name, DEFAULT_VIEW_NAME);
        let data = store.get_table_data(table_id, view.id).unwrap();
        let names: Vec<_> = data.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Name", "Age", "Address"]);
        assert_eq!(data.columns[1].column_type, ColumnType::Number);
        assert_eq!(store.resolve_default_view(table_id).unwrap().id, view.id);
    }

    #[test]
    fn test_add_row_creates_empty_cells() {
        let (store, table_id, view) = store_with_table();
        store.add_row(table_id).unwrap();
        let data = store.get_table_data(table_id, view.id).unwrap();
        let row = &data.rows[0];
        assert!(row.is_complete(&data.columns));
        assert_eq!(row.cells[0].value_text.as_deref(), Some(""));
        assert_eq!(row.cells[1].value_number, None);
    }

    #[test]
    fn test_add_rows_requires_columns() {
        let store = MemoryStore::new();
        let (table_id, _) = store.create_table_with_columns("Empty", &[]).unwrap();
        let err = store.add_rows(table_id, 5).unwrap_err();
        assert_eq!(err, StoreError::Validation("Table has no columns".into()));
    }

    #[test]
    fn test_add_rows_fills_synthetic_values() {
        let (store, table_id, view) = store_with_table();
        assert_eq!(store.add_rows(table_id, 20).unwrap(), 20);
        let data = store.get_table_data(table_id, view.id).unwrap();
        assert_eq!(data.rows.len(), 20);
        let age = &data.columns[1];
        for row in &data.rows {
            let n = row.value_for(age).as_number().unwrap();
            assert!((18.0..=69.0).contains(&n));
        }
    }

    #[test]
    fn test_update_cell_number_validation() {
        let (store, table_id, view) = store_with_table();
        store.add_row(table_id).unwrap();
        let data = store.get_table_data(table_id, view.id).unwrap();
        let cell_id = data.rows[0].cells[1].id;

        let cell = store.update_cell(cell_id, " 42 ", ColumnType::Number).unwrap();
        assert_eq!(cell.value_number, Some(42.0));

        let cell = store.update_cell(cell_id, "  ", ColumnType::Number).unwrap();
        assert_eq!(cell.value_number, None);

        assert!(matches!(
            store.update_cell(cell_id, "abc", ColumnType::Number),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.update_cell(CellId::new(), "x", ColumnType::Text),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_add_column_appends_cells() {
        let (store, table_id, view) = store_with_table();
        store.add_rows(table_id, 3).unwrap();
        let column = store.add_column(table_id).unwrap();
        assert_eq!(column.name, NEW_COLUMN_NAME);
        assert_eq!(column.position, 3);
        let data = store.get_table_data(table_id, view.id).unwrap();
        assert!(data.rows.iter().all(|r| r.is_complete(&data.columns)));
    }

    #[test]
    fn test_delete_column_cleans_view_references() {
        let (store, table_id, view) = store_with_table();
        store.add_rows(table_id, 2).unwrap();
        let age = store.get_table_data(table_id, view.id).unwrap().columns[1].id;
        store
            .add_filter(view.id, Filter::new(age, FilterOperator::Gt, "20"))
            .unwrap();
        store
            .add_sort(view.id, Sort::new(age, SortDirection::Desc, 0))
            .unwrap();
        store
            .set_hidden_columns(view.id, &BTreeSet::from([age]))
            .unwrap();

        store.delete_column(age).unwrap();

        let view = store.get_view(view.id).unwrap();
        assert!(view.filters.is_empty());
        assert!(view.sorts.is_empty());
        assert!(view.hidden_column_ids.is_empty());
        let data = store.get_table_data(table_id, view.id).unwrap();
        assert_eq!(data.columns.len(), 2);
        assert!(data.rows.iter().all(|r| r.cells.len() == 2));
    }

    #[test]
    fn test_update_column_converts_cells() {
        let (store, table_id, view) = store_with_table();
        store.add_row(table_id).unwrap();
        let data = store.get_table_data(table_id, view.id).unwrap();
        let (name, age) = (data.columns[0].id, data.columns[1].id);
        let name_cell = data.rows[0].cells[0].id;
        let age_cell = data.rows[0].cells[1].id;
        store.update_cell(age_cell, "31", ColumnType::Number).unwrap();
        store.update_cell(name_cell, "Ada", ColumnType::Text).unwrap();

        store.update_column(age, None, Some(ColumnType::Text)).unwrap();
        let column = store.update_column(name, Some("Label"), Some(ColumnType::Number)).unwrap();
        assert_eq!(column.name, "Label");

        let data = store.get_table_data(table_id, view.id).unwrap();
        let row = &data.rows[0];
        assert_eq!(row.cell_for(age).unwrap().value_text.as_deref(), Some("31"));
        assert_eq!(row.cell_for(name).unwrap().value_number, None);
        assert_eq!(row.cell_for(name).unwrap().value_text, None);
    }

    #[test]
    fn test_update_column_requires_a_change() {
        let (store, table_id, view) = store_with_table();
        let col = store.get_table_data(table_id, view.id).unwrap().columns[0].id;
        assert_eq!(
            store.update_column(col, None, None).unwrap_err(),
            StoreError::Validation("No updates provided".into())
        );
        assert!(store.update_column(col, Some("  "), None).is_err());
    }

    #[test]
    fn test_view_name_limits() {
        let (store, table_id, _) = store_with_table();
        assert!(store.create_view(table_id, "").is_err());
        assert!(store.create_view(table_id, &"x".repeat(256)).is_err());
        let view = store.create_view(table_id, &"x".repeat(255)).unwrap();
        let renamed = store.rename_view(view.id, "Second").unwrap();
        assert_eq!(renamed.name, "Second");
        assert_eq!(store.list_views(table_id).unwrap().len(), 2);
    }

    #[test]
    fn test_default_view_is_earliest() {
        let (store, table_id, first) = store_with_table();
        store.create_view(table_id, "Later").unwrap();
        assert_eq!(store.resolve_default_view(table_id).unwrap().id, first.id);

        store.delete_view(first.id).unwrap();
        assert_eq!(store.resolve_default_view(table_id).unwrap().name, "Later");
    }

    #[test]
    fn test_no_default_view() {
        let store = MemoryStore::new();
        let table_id = TableId::new();
        let err = store.resolve_default_view(table_id).unwrap_err();
        assert!(err.to_string().starts_with("No view found for table"));
    }

    #[test]
    fn test_view_of_other_table_is_rejected() {
        let store = MemoryStore::new();
        let (a, _) = store.create_table("A").unwrap();
        let (_, view_b) = store.create_table("B").unwrap();
        assert!(matches!(
            store.get_table_data(a, view_b.id),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_saved_query_shapes_fetch() {
        let (store, table_id, view) = store_with_table();
        store.add_rows(table_id, 50).unwrap();
        let columns = store.get_table_data(table_id, view.id).unwrap().columns;
        let age = columns[1].id;
        let query = crate::query::compose(
            &[Filter::new(age, FilterOperator::Gt, "40")],
            &[Sort::new(age, SortDirection::Asc, 0)],
            "",
            &columns,
        );
        store.save_query(view.id, &query).unwrap();

        let data = store.get_table_data(table_id, view.id).unwrap();
        let ages: Vec<f64> = data
            .rows
            .iter()
            .filter_map(|r| r.value_for(&columns[1]).as_number())
            .collect();
        assert!(ages.iter().all(|&a| a > 40.0));
        assert!(ages.windows(2).all(|w| w[0] <= w[1]));
        assert!(store.row_count(table_id).unwrap() >= data.rows.len());
    }

    #[test]
    fn test_failure_plan_add_rows() {
        let (store, table_id, _) = store_with_table();
        store
            .set_failure_plan(
                FailurePlan::new().fail_add_rows_call(2, StoreError::Request("boom".into())),
            )
            .unwrap();
        assert!(store.add_rows(table_id, 10).is_ok());
        assert!(store.add_rows(table_id, 10).is_err());
        assert!(store.add_rows(table_id, 10).is_ok());
        assert_eq!(store.row_count(table_id).unwrap(), 20);
        assert_eq!(store.add_rows_calls(), 3);
    }

    #[test]
    fn test_delete_row() {
        let (store, table_id, _) = store_with_table();
        let row = store.add_row(table_id).unwrap();
        store.delete_row(row).unwrap();
        assert_eq!(store.row_count(table_id).unwrap(), 0);
        assert!(store.delete_row(row).is_err());
    }
}
