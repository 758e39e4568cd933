//! View query composition
//!
//! Turns a view's filter/sort/search state into one canonical
//! [`QueryDescription`] and evaluates such descriptions against table data.
//!
//! ```text
//! QueryState
//! ├── FilterBuilder  (draft filters, operator revalidation)
//! ├── SortBuilder    (draft sort keys, order_index = list position)
//! └── SearchBox      (debounced free-text input)
//!         │
//!         ▼ compose()
//! QueryDescription { filters, sorts, search_query }
//! ```

mod filter;
mod search;
mod sort;

pub use filter::{matches_filter, matches_search, FilterBuilder};
pub use search::{SearchBox, SEARCH_DEBOUNCE_MS};
pub use sort::{compare_rows, compare_values, SortBuilder};

use serde::{Deserialize, Serialize};

use crate::model::table::{parse_number, Column, ColumnId, ColumnType, TableData};
use crate::model::view::{Filter, FilterOperator, Sort, SortDirection, View};

/// One filter as submitted to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub column_id: ColumnId,
    pub operator: FilterOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_number: Option<f64>,
}

/// One sort key as submitted to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySort {
    pub column_id: ColumnId,
    pub direction: SortDirection,
    pub order_index: u32,
}

/// Canonical query for one view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryDescription {
    pub filters: Vec<QueryFilter>,
    pub sorts: Vec<QuerySort>,
    pub search_query: String,
}

impl QueryDescription {
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.sorts.is_empty() && self.search_query.trim().is_empty()
    }

    /// Wire form sent to the store
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Filter entries equivalent to the submitted filters
    pub fn to_filters(&self) -> Vec<Filter> {
        self.filters
            .iter()
            .map(|f| Filter {
                column_id: Some(f.column_id),
                operator: Some(f.operator),
                value: match (&f.value_text, f.value_number) {
                    (Some(text), _) => text.clone(),
                    (None, Some(n)) => crate::model::table::format_number(n),
                    (None, None) => String::new(),
                },
            })
            .collect()
    }

    /// Sort entries equivalent to the submitted sorts
    pub fn to_sorts(&self) -> Vec<Sort> {
        self.sorts
            .iter()
            .map(|s| Sort::new(s.column_id, s.direction, s.order_index))
            .collect()
    }
}

/// Convert one filter into its submitted form.
///
/// Returns `None` for anything not ready to submit: unset column or
/// operator, a missing required value, an unknown column, an operator the
/// column type cannot use, or a non-numeric value where a number is needed.
fn compose_filter(filter: &Filter, columns: &[Column]) -> Option<QueryFilter> {
    if !filter.is_complete() {
        return None;
    }
    let column_id = filter.column_id?;
    let operator = filter.operator?;
    let column = columns.iter().find(|c| c.id == column_id)?;
    if !operator.is_compatible_with(column.column_type) {
        return None;
    }

    let (value_text, value_number) = match (operator, column.column_type) {
        (FilterOperator::IsEmpty | FilterOperator::NotEmpty, _) => (None, None),
        (FilterOperator::Gt | FilterOperator::Lt, _)
        | (FilterOperator::Equals, ColumnType::Number) => {
            (None, Some(parse_number(&filter.value).ok()??))
        }
        (FilterOperator::Equals | FilterOperator::Contains | FilterOperator::NotContains, _) => {
            (Some(filter.value.clone()), None)
        }
    };

    Some(QueryFilter {
        column_id,
        operator,
        value_text,
        value_number,
    })
}

/// Compose the canonical query description.
///
/// Pure: the same inputs always produce an identical description. Sorts are
/// ordered by `order_index`; entries sharing an index keep list order.
pub fn compose(
    filters: &[Filter],
    sorts: &[Sort],
    search_query: &str,
    columns: &[Column],
) -> QueryDescription {
    let filters = filters
        .iter()
        .filter_map(|f| compose_filter(f, columns))
        .collect();

    let mut keyed: Vec<&Sort> = sorts
        .iter()
        .filter(|s| {
            s.column_id
                .is_some_and(|id| columns.iter().any(|c| c.id == id))
        })
        .collect();
    keyed.sort_by_key(|s| s.order_index);
    let sorts = keyed
        .into_iter()
        .filter_map(|s| {
            Some(QuerySort {
                column_id: s.column_id?,
                direction: s.direction,
                order_index: s.order_index,
            })
        })
        .collect();

    QueryDescription {
        filters,
        sorts,
        search_query: search_query.to_string(),
    }
}

/// Compose the query currently stored on a view
pub fn compose_view(view: &View, columns: &[Column]) -> QueryDescription {
    compose(&view.filters, &view.sorts, &view.search_query, columns)
}

/// Resolve rows for a query: filter, search, then stable sort.
///
/// Columns are returned ordered by position. Filters or sorts naming a
/// column that no longer exists are ignored.
pub fn execute(table: &TableData, query: &QueryDescription) -> TableData {
    let mut columns = table.columns.clone();
    columns.sort_by_key(|c| c.position);

    let mut rows: Vec<_> = table
        .rows
        .iter()
        .filter(|row| {
            query.filters.iter().all(|f| match columns.iter().find(|c| c.id == f.column_id) {
                Some(column) => matches_filter(f, &row.value_for(column)),
                None => true,
            })
        })
        .filter(|row| matches_search(row, &columns, &query.search_query))
        .cloned()
        .collect();

    if !query.sorts.is_empty() {
        let keys: Vec<(&Column, SortDirection)> = query
            .sorts
            .iter()
            .filter_map(|s| {
                columns
                    .iter()
                    .find(|c| c.id == s.column_id)
                    .map(|c| (c, s.direction))
            })
            .collect();
        rows.sort_by(|a, b| compare_rows(a, b, &keys));
    }

    TableData { columns, rows }
}

/// A query handed to the store, with the view it becomes once stored
#[derive(Debug, Clone, PartialEq)]
pub struct PendingQuery {
    pub view: View,
    pub query: QueryDescription,
}

/// Client-side query state for the open view
///
/// Builders hold drafts; only applied entries live on the [`View`] and are
/// composed for submission. A submission only becomes the view's state once
/// the store accepts it. One submission is in flight at a time; a newer one
/// waits and replaces any older waiting one.
#[derive(Debug, Clone)]
pub struct QueryState {
    pub filters: FilterBuilder,
    pub sorts: SortBuilder,
    pub search: SearchBox,
    /// Last description the store accepted
    pub last_submitted: Option<QueryDescription>,
    in_flight: Option<PendingQuery>,
    queued: Option<PendingQuery>,
}

impl QueryState {
    pub fn new(search_debounce_ms: u64) -> Self {
        Self {
            filters: FilterBuilder::default(),
            sorts: SortBuilder::default(),
            search: SearchBox::new(search_debounce_ms),
            last_submitted: None,
            in_flight: None,
            queued: None,
        }
    }

    /// Seed builders from a view freshly loaded from the store
    pub fn load_view(&mut self, view: &View, columns: &[Column]) {
        self.filters = FilterBuilder::from_filters(view.filters.clone());
        self.sorts = SortBuilder::from_sorts(view.sorts.clone());
        self.search.reset(&view.search_query);
        self.last_submitted = Some(compose_view(view, columns));
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The view as it will be once every staged submission is stored;
    /// `applied` when nothing is staged
    pub fn intended_view<'a>(&'a self, applied: &'a View) -> &'a View {
        self.queued
            .as_ref()
            .or(self.in_flight.as_ref())
            .map_or(applied, |p| &p.view)
    }

    /// Stage `view` for submission unless it composes to the newest query
    /// already stored or staged. Returns the query to send now, or `None`
    /// when unchanged or waiting behind the one in flight.
    pub fn stage(&mut self, view: View, columns: &[Column]) -> Option<QueryDescription> {
        let query = compose_view(&view, columns);
        let newest = self
            .queued
            .as_ref()
            .or(self.in_flight.as_ref())
            .map(|p| &p.query)
            .or(self.last_submitted.as_ref());
        if newest == Some(&query) {
            tracing::debug!("query unchanged, skipping submit");
            return None;
        }
        let pending = PendingQuery {
            view,
            query: query.clone(),
        };
        if self.in_flight.is_some() {
            tracing::debug!("query submission in flight, queueing");
            self.queued = Some(pending);
            return None;
        }
        self.in_flight = Some(pending);
        Some(query)
    }

    /// The in-flight submission was stored; returns the view it produced
    pub fn accept(&mut self) -> Option<View> {
        let pending = self.in_flight.take()?;
        self.last_submitted = Some(pending.query);
        Some(pending.view)
    }

    /// The in-flight submission failed; the view keeps its previous state
    pub fn reject(&mut self) {
        self.in_flight = None;
    }

    /// Send the waiting submission, if it still differs from what is stored
    pub fn release_queued(&mut self) -> Option<QueryDescription> {
        if self.in_flight.is_some() {
            return None;
        }
        let pending = self.queued.take()?;
        if self.last_submitted.as_ref() == Some(&pending.query) {
            return None;
        }
        let query = pending.query.clone();
        self.in_flight = Some(pending);
        Some(query)
    }
}
