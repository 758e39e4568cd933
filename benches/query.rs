//! Benchmarks for query composition and execution
//!
//! Run with: cargo bench query

use gridlens::model::{Column, ColumnType, Filter, FilterOperator, Sort, SortDirection};
use gridlens::model::{TableData, TableId};
use gridlens::query::{compose, execute};
use gridlens::store::{MemoryStore, TableStore, ViewStore};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

/// Synthetic Name/Age/Address table with `rows` rows
fn table(rows: usize) -> TableData {
    let store = MemoryStore::with_seed(42);
    let (table_id, view): (TableId, _) = store.create_table("Bench").unwrap();
    store.add_rows(table_id, rows).unwrap();
    store.get_table_data(table_id, view.id).unwrap()
}

fn entries(columns: &[Column]) -> (Vec<Filter>, Vec<Sort>) {
    let filters = vec![
        Filter::new(columns[1].id, FilterOperator::Gt, "30"),
        Filter::new(columns[0].id, FilterOperator::Contains, "a"),
        Filter::new(columns[2].id, FilterOperator::NotEmpty, ""),
    ];
    let sorts = vec![
        Sort::new(columns[1].id, SortDirection::Desc, 0),
        Sort::new(columns[0].id, SortDirection::Asc, 1),
    ];
    (filters, sorts)
}

// ============================================================================
// Composition
// ============================================================================

#[divan::bench]
fn compose_query(bencher: divan::Bencher) {
    let columns = vec![
        Column::new("Name", ColumnType::Text, 0),
        Column::new("Age", ColumnType::Number, 1),
        Column::new("Address", ColumnType::Text, 2),
    ];
    let (filters, sorts) = entries(&columns);
    bencher.bench_local(|| divan::black_box(compose(&filters, &sorts, "lane", &columns)));
}

// ============================================================================
// Execution
// ============================================================================

#[divan::bench(args = [1_000, 10_000, 100_000])]
fn filter_and_sort(bencher: divan::Bencher, rows: usize) {
    let data = table(rows);
    let (filters, sorts) = entries(&data.columns);
    let query = compose(&filters, &sorts, "", &data.columns);
    bencher.bench_local(|| divan::black_box(execute(&data, &query)));
}

#[divan::bench(args = [1_000, 10_000, 100_000])]
fn search_only(bencher: divan::Bencher, rows: usize) {
    let data = table(rows);
    let query = compose(&[], &[], "street", &data.columns);
    bencher.bench_local(|| divan::black_box(execute(&data, &query)));
}

#[divan::bench]
fn get_table_data_with_view(bencher: divan::Bencher) {
    let store = MemoryStore::with_seed(42);
    let (table_id, view) = store.create_table("Bench").unwrap();
    store.add_rows(table_id, 10_000).unwrap();
    let data = store.get_table_data(table_id, view.id).unwrap();
    let (filters, sorts) = entries(&data.columns);
    store.replace_filters(view.id, filters).unwrap();
    store.replace_sorts(view.id, sorts).unwrap();
    bencher.bench_local(|| divan::black_box(store.get_table_data(table_id, view.id).unwrap()));
}
