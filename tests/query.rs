//! Filters, sorts and debounced search through the runtime

mod common;

use common::loaded;
use gridlens::messages::{AppMsg, Msg, QueryMsg};
use gridlens::model::{AppModel, CellValue, FilterOperator, SortDirection};
use gridlens::runtime::Runtime;
use gridlens::store::{FailurePlan, MemoryStore, StoreError, ViewStore};

fn ages(model: &AppModel) -> Vec<Option<f64>> {
    let age = &model.data.columns[1];
    model
        .data
        .rows
        .iter()
        .map(|r| r.value_for(age).as_number())
        .collect()
}

fn apply(runtime: &mut Runtime<MemoryStore>, model: &mut AppModel, msgs: Vec<QueryMsg>) {
    for msg in msgs {
        runtime.dispatch(model, Msg::Query(msg));
    }
    runtime.run_until_idle(model).unwrap();
}

fn age_filter(model: &AppModel, operator: FilterOperator, value: &str) -> Vec<QueryMsg> {
    let index = model.query.filters.len();
    vec![
        QueryMsg::AddFilter,
        QueryMsg::SetFilterColumn {
            index,
            column_id: model.data.columns[1].id,
        },
        QueryMsg::SetFilterOperator { index, operator },
        QueryMsg::SetFilterValue {
            index,
            value: value.to_string(),
        },
        QueryMsg::ApplyFilters,
    ]
}

// ========================================================================
// Filters
// ========================================================================

#[test]
fn test_numeric_filter_limits_rows() {
    let (mut runtime, mut model) = loaded(40);
    let msgs = age_filter(&model, FilterOperator::Gt, "40");
    apply(&mut runtime, &mut model, msgs);

    assert!(model.data.row_count() < 40);
    assert!(ages(&model).iter().all(|a| a.is_some_and(|a| a > 40.0)));
    assert_eq!(model.view.filters.len(), 1);
    let stored = runtime.store().get_view(model.view.id).unwrap();
    assert_eq!(stored.filters, model.view.filters);
}

#[test]
fn test_failed_filter_submit_leaves_view_unchanged() {
    let (mut runtime, mut model) = loaded(40);
    runtime
        .store()
        .set_failure_plan(FailurePlan::new().fail_next_fetch(StoreError::Request("offline".into())))
        .unwrap();
    let msgs = age_filter(&model, FilterOperator::Gt, "40");
    apply(&mut runtime, &mut model, msgs);

    assert_eq!(model.data.row_count(), 40);
    assert!(model.view.filters.is_empty());
    assert!(!model.loading);
    assert!(model.ui.latest_diagnostic().unwrap().contains("offline"));
    // The draft survives, so applying again retries
    assert_eq!(model.query.filters.len(), 1);

    runtime.dispatch(&mut model, Msg::Query(QueryMsg::ApplyFilters));
    assert_eq!(runtime.in_flight(), 1);
    runtime.run_until_idle(&mut model).unwrap();

    assert_eq!(model.view.filters.len(), 1);
    assert!(ages(&model).iter().all(|a| a.is_some_and(|a| a > 40.0)));
}

#[test]
fn test_failed_search_submit_can_settle_again() {
    let (mut runtime, mut model) = loaded(10);
    runtime
        .store()
        .set_failure_plan(FailurePlan::new().fail_next_fetch(StoreError::Request("offline".into())))
        .unwrap();
    runtime.dispatch(&mut model, Msg::search("name1"));
    runtime.run_until_idle(&mut model).unwrap();
    assert_eq!(model.view.search_query, "");
    assert_eq!(model.data.row_count(), 10);

    runtime.dispatch(&mut model, Msg::search("name1"));
    runtime.run_until_idle(&mut model).unwrap();
    assert_eq!(model.view.search_query, "name1");
}

#[test]
fn test_incomplete_filter_is_not_applied() {
    let (mut runtime, mut model) = loaded(5);
    runtime.dispatch(&mut model, Msg::Query(QueryMsg::AddFilter));
    runtime.dispatch(&mut model, Msg::Query(QueryMsg::ApplyFilters));
    assert_eq!(runtime.in_flight(), 0);
    assert!(model.view.filters.is_empty());
    assert!(model.ui.latest_diagnostic().is_some());
}

#[test]
fn test_clear_filters_restores_rows() {
    let (mut runtime, mut model) = loaded(30);
    let msgs = age_filter(&model, FilterOperator::Lt, "30");
    apply(&mut runtime, &mut model, msgs);
    let filtered = model.data.row_count();
    assert!(filtered < 30);

    apply(&mut runtime, &mut model, vec![QueryMsg::ClearFilters]);
    assert_eq!(model.data.row_count(), 30);
    assert!(model.query.filters.is_empty());
}

#[test]
fn test_is_empty_ignores_value() {
    let (mut runtime, mut model) = loaded(5);
    runtime.dispatch(&mut model, Msg::App(AppMsg::AddRow));
    runtime.run_until_idle(&mut model).unwrap();

    let msgs = age_filter(&model, FilterOperator::IsEmpty, "999");
    apply(&mut runtime, &mut model, msgs);
    assert_eq!(ages(&model), vec![None]);
}

// ========================================================================
// Sorts
// ========================================================================

#[test]
fn test_sort_desc_with_nulls_last() {
    let (mut runtime, mut model) = loaded(12);
    runtime.dispatch(&mut model, Msg::App(AppMsg::AddRow));
    runtime.run_until_idle(&mut model).unwrap();

    let age = model.data.columns[1].id;
    apply(
        &mut runtime,
        &mut model,
        vec![
            QueryMsg::AddSort(Some(age)),
            QueryMsg::SetSortDirection {
                index: 0,
                direction: SortDirection::Desc,
            },
            QueryMsg::ApplySorts,
        ],
    );

    let ages = ages(&model);
    assert_eq!(ages.last(), Some(&None));
    let known: Vec<f64> = ages.iter().flatten().copied().collect();
    assert_eq!(known.len(), 12);
    assert!(known.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_unchanged_sorts_are_not_resubmitted() {
    let (mut runtime, mut model) = loaded(5);
    let name = model.data.columns[0].id;
    apply(
        &mut runtime,
        &mut model,
        vec![QueryMsg::AddSort(Some(name)), QueryMsg::ApplySorts],
    );
    runtime.dispatch(&mut model, Msg::Query(QueryMsg::ApplySorts));
    assert_eq!(runtime.in_flight(), 0);
}

#[test]
fn test_sort_reorders_and_keeps_cursor_on_cell() {
    let (mut runtime, mut model) = loaded(8);
    runtime.dispatch(&mut model, Msg::click(0, 0));
    let cell_id = model.grid.cursor.active_cell().unwrap().cell_id;
    let name = model.data.columns[0].id;
    apply(
        &mut runtime,
        &mut model,
        vec![
            QueryMsg::AddSort(Some(name)),
            QueryMsg::SetSortDirection {
                index: 0,
                direction: SortDirection::Desc,
            },
            QueryMsg::ApplySorts,
        ],
    );
    let active = model.grid.cursor.active_cell().unwrap();
    assert_eq!(active.cell_id, cell_id);
    assert_eq!(
        model.grid.address.resolve(active.row_index(), 0),
        Some(cell_id)
    );
}

// ========================================================================
// Search
// ========================================================================

#[test]
fn test_rapid_typing_submits_once() {
    let (mut runtime, mut model) = loaded(20);
    for text in ["a", "ab", "abc"] {
        runtime.dispatch(&mut model, Msg::search(text));
    }
    // Three settles (two stale) and one reload
    let handled = runtime.run_until_idle(&mut model).unwrap();
    assert_eq!(handled, 4);
    assert_eq!(model.view.search_query, "abc");
    let stored = runtime.store().get_view(model.view.id).unwrap();
    assert_eq!(stored.search_query, "abc");
}

#[test]
fn test_search_back_to_submitted_text_is_a_no_op() {
    let (mut runtime, mut model) = loaded(5);
    runtime.dispatch(&mut model, Msg::search("zz"));
    runtime.run_until_idle(&mut model).unwrap();

    runtime.dispatch(&mut model, Msg::search("zzz"));
    runtime.dispatch(&mut model, Msg::search("zz"));
    let handled = runtime.run_until_idle(&mut model).unwrap();
    assert_eq!(handled, 2);
}

#[test]
fn test_search_is_case_insensitive_over_cells() {
    let (mut runtime, mut model) = loaded(15);
    let name_col = model.data.columns[0].clone();
    let needle = match model.data.rows[3].value_for(&name_col) {
        CellValue::Text(Some(name)) => name.to_uppercase(),
        other => panic!("unexpected name {:?}", other),
    };
    runtime.dispatch(&mut model, Msg::search(needle.clone()));
    runtime.run_until_idle(&mut model).unwrap();

    assert!(model.data.row_count() >= 1);
    let lower = needle.to_lowercase();
    for row in &model.data.rows {
        let hit = row
            .cells
            .iter()
            .any(|c| c.value_text.as_deref().unwrap_or("").to_lowercase().contains(&lower));
        assert!(hit);
    }
}

#[test]
fn test_empty_search_matches_everything() {
    let (mut runtime, mut model) = loaded(6);
    runtime.dispatch(&mut model, Msg::search("no such value anywhere"));
    runtime.run_until_idle(&mut model).unwrap();
    assert_eq!(model.data.row_count(), 0);

    runtime.dispatch(&mut model, Msg::search(""));
    runtime.run_until_idle(&mut model).unwrap();
    assert_eq!(model.data.row_count(), 6);
}
