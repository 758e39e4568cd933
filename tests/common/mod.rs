//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::Arc;

use gridlens::config::GridConfig;
use gridlens::messages::{AppMsg, Msg};
use gridlens::model::{
    AppModel, Cell, CellValue, Column, ColumnType, Row, RowId, TableData, TableId, View,
};
use gridlens::runtime::Runtime;
use gridlens::store::{MemoryStore, TableStore, ViewStore};
use gridlens::update::update;

/// Config with timers short enough for tests
pub fn test_config() -> GridConfig {
    GridConfig {
        search_debounce_ms: 5,
        bulk_batch_delay_ms: 0,
        ..GridConfig::default()
    }
}

/// Name (text), Age (number), Address (text)
pub fn test_columns() -> Vec<Column> {
    vec![
        Column::new("Name", ColumnType::Text, 0),
        Column::new("Age", ColumnType::Number, 1),
        Column::new("Address", ColumnType::Text, 2),
    ]
}

/// Create a store-less model with `rows` loaded rows of the test columns.
/// Row `i` holds `name{i}`, `20 + i`, `addr{i}`.
pub fn test_model(rows: usize) -> AppModel {
    let table_id = TableId::new();
    let view = View::new(table_id, "Grid view", 0);
    let mut model = AppModel::new(test_config(), table_id, view);
    let columns = test_columns();
    let rows = (0..rows)
        .map(|i| Row {
            id: RowId::new(),
            cells: vec![
                Cell::new(columns[0].id, CellValue::Text(Some(format!("name{}", i)))),
                Cell::new(columns[1].id, CellValue::Number(Some(20.0 + i as f64))),
                Cell::new(columns[2].id, CellValue::Text(Some(format!("addr{}", i)))),
            ],
        })
        .collect();
    model.load_data(TableData { columns, rows });
    model
}

/// Run a sequence of messages through `update`, discarding commands
pub fn apply_all(model: &mut AppModel, msgs: impl IntoIterator<Item = Msg>) {
    for msg in msgs {
        update(model, msg);
    }
}

/// A store holding one table with the default columns and `rows` synthetic rows
pub fn seeded_store(rows: usize) -> (Arc<MemoryStore>, TableId, View) {
    let store = MemoryStore::with_seed(7);
    let (table_id, _) = store.create_table("People").unwrap();
    if rows > 0 {
        store.add_rows(table_id, rows).unwrap();
    }
    let view = store.resolve_default_view(table_id).unwrap();
    (Arc::new(store), table_id, view)
}

/// A runtime plus a model that has completed its first load
pub fn loaded(rows: usize) -> (Runtime<MemoryStore>, AppModel) {
    let (store, table_id, view) = seeded_store(rows);
    let mut model = AppModel::new(test_config(), table_id, view);
    let mut runtime = Runtime::new(store);
    runtime.dispatch(&mut model, Msg::App(AppMsg::Refresh));
    runtime.run_until_idle(&mut model).unwrap();
    (runtime, model)
}
