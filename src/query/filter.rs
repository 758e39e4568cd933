//! Filter evaluation and the filter builder

use crate::model::table::{Column, ColumnId, ColumnType, Row};
use crate::model::view::{Filter, FilterOperator};

use super::QueryFilter;

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Evaluate one submitted filter against a cell value.
///
/// Text comparisons for `contains`/`not_contains` are case-insensitive and
/// run over the display text, so they also work on number columns. An empty
/// cell never "contains" anything, which makes it match `not_contains`.
pub fn matches_filter(filter: &QueryFilter, value: &crate::model::table::CellValue) -> bool {
    match filter.operator {
        FilterOperator::IsEmpty => value.is_empty(),
        FilterOperator::NotEmpty => !value.is_empty(),
        FilterOperator::Equals => match (filter.value_number, value.as_number()) {
            (Some(wanted), Some(actual)) => actual == wanted,
            (Some(_), None) => false,
            (None, _) => match &filter.value_text {
                Some(text) => !value.is_null() && value.display() == *text,
                None => false,
            },
        },
        FilterOperator::Contains => match &filter.value_text {
            Some(text) => !value.is_null() && contains_ignore_case(&value.display(), text),
            None => false,
        },
        FilterOperator::NotContains => match &filter.value_text {
            Some(text) => value.is_null() || !contains_ignore_case(&value.display(), text),
            None => true,
        },
        FilterOperator::Gt => match (value.as_number(), filter.value_number) {
            (Some(actual), Some(bound)) => actual > bound,
            _ => false,
        },
        FilterOperator::Lt => match (value.as_number(), filter.value_number) {
            (Some(actual), Some(bound)) => actual < bound,
            _ => false,
        },
    }
}

/// Free-text search: any cell's display text contains the query,
/// ignoring case. A blank query matches every row.
pub fn matches_search(row: &Row, columns: &[Column], query: &str) -> bool {
    let needle = query.trim();
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    columns.iter().any(|column| {
        row.value_for(column)
            .display()
            .to_lowercase()
            .contains(&needle)
    })
}

/// Draft filter list edited by the user before applying
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    entries: Vec<Filter>,
}

impl FilterBuilder {
    pub fn from_filters(entries: Vec<Filter>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Filter] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an empty filter and return its index
    pub fn add(&mut self) -> usize {
        self.entries.push(Filter::default());
        self.entries.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Option<Filter> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Point a filter at a new column, resetting the operator when the new
    /// column's type does not offer it.
    pub fn set_column(&mut self, index: usize, column_id: ColumnId, column_type: ColumnType) {
        let Some(entry) = self.entries.get_mut(index) else {
            return;
        };
        entry.column_id = Some(column_id);
        if let Some(op) = entry.operator {
            if !FilterOperator::for_column_type(column_type).contains(&op) {
                tracing::debug!(
                    "filter {}: operator {} not offered for {} column, resetting",
                    index,
                    op.as_str(),
                    column_type
                );
                entry.operator = None;
            }
        }
    }

    pub fn set_operator(&mut self, index: usize, operator: FilterOperator) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.operator = Some(operator);
            if !operator.requires_value() {
                entry.value.clear();
            }
        }
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.value = value.into();
        }
    }

    /// Re-check every entry against current column types, e.g. after a
    /// column was retyped or deleted
    pub fn revalidate(&mut self, columns: &[Column]) {
        for entry in &mut self.entries {
            let Some(column_id) = entry.column_id else {
                continue;
            };
            match columns.iter().find(|c| c.id == column_id) {
                Some(column) => {
                    if let Some(op) = entry.operator {
                        if !FilterOperator::for_column_type(column.column_type).contains(&op) {
                            entry.operator = None;
                        }
                    }
                }
                None => {
                    entry.column_id = None;
                    entry.operator = None;
                }
            }
        }
    }

    /// Every entry is complete (applying partial filters is not allowed)
    pub fn can_apply(&self) -> bool {
        self.entries.iter().all(Filter::is_complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::{Cell, CellValue, RowId};

    fn text_filter(operator: FilterOperator, value: &str) -> QueryFilter {
        QueryFilter {
            column_id: ColumnId::new(),
            operator,
            value_text: Some(value.to_string()),
            value_number: None,
        }
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(Some(s.to_string()))
    }

    #[test]
    fn test_contains_matches_substrings() {
        let f = text_filter(FilterOperator::Contains, "ab");
        assert!(matches_filter(&f, &text("abc")));
        assert!(matches_filter(&f, &text("xaby")));
        assert!(!matches_filter(&f, &text("xy")));
        assert!(matches_filter(&f, &text("ABBA")));
        assert!(!matches_filter(&f, &CellValue::Text(None)));
    }

    #[test]
    fn test_not_contains_includes_empty_cells() {
        let f = text_filter(FilterOperator::NotContains, "ab");
        assert!(matches_filter(&f, &text("xy")));
        assert!(!matches_filter(&f, &text("cab")));
        assert!(matches_filter(&f, &CellValue::Text(None)));
    }

    #[test]
    fn test_is_empty_ignores_supplied_value() {
        let f = text_filter(FilterOperator::IsEmpty, "whatever");
        assert!(matches_filter(&f, &CellValue::Text(None)));
        assert!(matches_filter(&f, &text("")));
        assert!(matches_filter(&f, &CellValue::Number(None)));
        assert!(!matches_filter(&f, &text("x")));
        assert!(!matches_filter(&f, &CellValue::Number(Some(0.0))));
    }

    #[test]
    fn test_numeric_comparisons() {
        let gt = QueryFilter {
            column_id: ColumnId::new(),
            operator: FilterOperator::Gt,
            value_text: None,
            value_number: Some(10.0),
        };
        assert!(matches_filter(&gt, &CellValue::Number(Some(11.0))));
        assert!(!matches_filter(&gt, &CellValue::Number(Some(10.0))));
        assert!(!matches_filter(&gt, &CellValue::Number(None)));

        let eq = QueryFilter {
            operator: FilterOperator::Equals,
            ..gt.clone()
        };
        assert!(matches_filter(&eq, &CellValue::Number(Some(10.0))));
        assert!(!matches_filter(&eq, &CellValue::Number(Some(10.5))));
    }

    #[test]
    fn test_contains_on_number_column_uses_display_text() {
        let f = text_filter(FilterOperator::Contains, "4");
        assert!(matches_filter(&f, &CellValue::Number(Some(42.0))));
        assert!(!matches_filter(&f, &CellValue::Number(Some(17.0))));
    }

    #[test]
    fn test_search_spans_columns() {
        let a = Column::new("A", ColumnType::Text, 0);
        let b = Column::new("B", ColumnType::Number, 1);
        let row = Row {
            id: RowId::new(),
            cells: vec![
                Cell::new(a.id, text("Hello")),
                Cell::new(b.id, CellValue::Number(Some(99.0))),
            ],
        };
        let cols = [a, b];
        assert!(matches_search(&row, &cols, "hell"));
        assert!(matches_search(&row, &cols, "99"));
        assert!(matches_search(&row, &cols, "  "));
        assert!(!matches_search(&row, &cols, "bye"));
    }

    #[test]
    fn test_column_switch_resets_incompatible_operator() {
        let mut builder = FilterBuilder::default();
        let i = builder.add();
        builder.set_column(i, ColumnId::new(), ColumnType::Number);
        builder.set_operator(i, FilterOperator::Gt);
        builder.set_value(i, "5");

        builder.set_column(i, ColumnId::new(), ColumnType::Text);
        assert_eq!(builder.entries()[i].operator, None);
        assert!(!builder.can_apply());

        builder.set_operator(i, FilterOperator::Contains);
        builder.set_column(i, ColumnId::new(), ColumnType::Number);
        assert_eq!(builder.entries()[i].operator, None);
    }

    #[test]
    fn test_column_switch_keeps_shared_operator() {
        let mut builder = FilterBuilder::default();
        let i = builder.add();
        builder.set_column(i, ColumnId::new(), ColumnType::Text);
        builder.set_operator(i, FilterOperator::Equals);
        builder.set_column(i, ColumnId::new(), ColumnType::Number);
        assert_eq!(builder.entries()[i].operator, Some(FilterOperator::Equals));
    }

    #[test]
    fn test_can_apply_requires_complete_entries() {
        let mut builder = FilterBuilder::default();
        assert!(builder.can_apply());
        let i = builder.add();
        assert!(!builder.can_apply());
        builder.set_column(i, ColumnId::new(), ColumnType::Text);
        builder.set_operator(i, FilterOperator::NotEmpty);
        assert!(builder.can_apply());
    }

    #[test]
    fn test_revalidate_drops_deleted_columns() {
        let kept = Column::new("Kept", ColumnType::Text, 0);
        let mut builder = FilterBuilder::from_filters(vec![
            Filter::new(kept.id, FilterOperator::Contains, "a"),
            Filter::new(ColumnId::new(), FilterOperator::Equals, "b"),
        ]);
        builder.revalidate(&[kept]);
        assert!(builder.entries()[0].is_complete());
        assert_eq!(builder.entries()[1].column_id, None);
    }
}
