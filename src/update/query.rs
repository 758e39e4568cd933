//! Query builder and search handlers
//!
//! Builder edits only touch drafts. Applying copies complete entries onto a
//! candidate view and submits the composed query; a query identical to the
//! last submission is never re-sent. The open view only takes the candidate
//! once the store accepts it.

use crate::commands::Cmd;
use crate::messages::QueryMsg;
use crate::model::{AppModel, View};
use crate::query::QueryDescription;

use super::app::report_store_error;

/// Handle filter/sort/search messages
pub fn update_query(model: &mut AppModel, msg: QueryMsg) -> Option<Cmd> {
    let query = &mut model.query;
    match msg {
        QueryMsg::AddFilter => {
            query.filters.add();
            None
        }
        QueryMsg::RemoveFilter(index) => {
            query.filters.remove(index);
            None
        }
        QueryMsg::SetFilterColumn { index, column_id } => {
            let Some(column) = model.data.column(column_id) else {
                tracing::warn!("filter {}: unknown column {}", index, column_id);
                return None;
            };
            query.filters.set_column(index, column_id, column.column_type);
            None
        }
        QueryMsg::SetFilterOperator { index, operator } => {
            query.filters.set_operator(index, operator);
            None
        }
        QueryMsg::SetFilterValue { index, value } => {
            query.filters.set_value(index, value);
            None
        }
        QueryMsg::ApplyFilters => {
            if !query.filters.can_apply() {
                model
                    .ui
                    .push_diagnostic("Complete every filter before applying");
                return None;
            }
            let mut view = query.intended_view(&model.view).clone();
            view.filters = query.filters.entries().to_vec();
            submit(model, view)
        }
        QueryMsg::ClearFilters => {
            query.filters.clear();
            let mut view = query.intended_view(&model.view).clone();
            view.filters.clear();
            submit(model, view)
        }

        QueryMsg::AddSort(column_id) => {
            query.sorts.add(column_id);
            None
        }
        QueryMsg::RemoveSort(index) => {
            query.sorts.remove(index);
            None
        }
        QueryMsg::SetSortColumn { index, column_id } => {
            query.sorts.set_column(index, column_id);
            None
        }
        QueryMsg::SetSortDirection { index, direction } => {
            query.sorts.set_direction(index, direction);
            None
        }
        QueryMsg::MoveSortUp(index) => {
            query.sorts.move_up(index);
            None
        }
        QueryMsg::MoveSortDown(index) => {
            query.sorts.move_down(index);
            None
        }
        QueryMsg::ApplySorts => {
            if !query.sorts.can_apply() {
                model.ui.push_diagnostic("Pick a column for every sort");
                return None;
            }
            let mut view = query.intended_view(&model.view).clone();
            view.sorts = query.sorts.entries().to_vec();
            submit(model, view)
        }
        QueryMsg::ClearSorts => {
            query.sorts.clear();
            let mut view = query.intended_view(&model.view).clone();
            view.sorts.clear();
            submit(model, view)
        }

        QueryMsg::SearchInput(text) => {
            let revision = query.search.set_input(text);
            Some(Cmd::DebouncedSearch {
                revision,
                delay_ms: query.search.debounce_ms(),
            })
        }
        QueryMsg::SearchSettled { revision } => {
            let text = query.search.settle(revision)?;
            let mut view = query.intended_view(&model.view).clone();
            view.search_query = text;
            submit(model, view)
        }

        QueryMsg::Submitted(result) => {
            match result {
                Ok(data) => {
                    if let Some(view) = model.query.accept() {
                        model.view = view;
                    }
                    model.load_data(data);
                }
                Err(err) => {
                    model.query.reject();
                    let search = model.query.intended_view(&model.view).search_query.clone();
                    model.query.search.revert_submitted(&search);
                    model.loading = false;
                    report_store_error(model, "Failed to apply view query", &err);
                }
            }
            let query = model.query.release_queued()?;
            Some(submit_cmd(model, query))
        }
    }
}

/// Submit `view`'s query if it changed
fn submit(model: &mut AppModel, view: View) -> Option<Cmd> {
    let query = model.query.stage(view, &model.data.columns)?;
    Some(submit_cmd(model, query))
}

fn submit_cmd(model: &mut AppModel, query: QueryDescription) -> Cmd {
    tracing::debug!(
        "submitting query: {} filters, {} sorts, search '{}'",
        query.filters.len(),
        query.sorts.len(),
        query.search_query
    );
    model.loading = true;
    Cmd::SubmitQuery {
        table_id: model.table_id,
        view_id: model.view.id,
        query,
    }
}
