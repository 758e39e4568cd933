//! View definitions: a named lens over a table
//!
//! A view never mutates table data. It carries the hidden-column set and the
//! filter/sort/search state the query composer turns into a
//! [`QueryDescription`](crate::query::QueryDescription).

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::table::{ColumnId, ColumnType, TableId};

/// Identifies a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub Uuid);

impl ViewId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Filter comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Equals,
    Contains,
    NotContains,
    IsEmpty,
    NotEmpty,
    Gt,
    Lt,
}

/// Operators offered for text columns, in menu order
pub const TEXT_OPERATORS: &[FilterOperator] = &[
    FilterOperator::Equals,
    FilterOperator::Contains,
    FilterOperator::NotContains,
    FilterOperator::IsEmpty,
    FilterOperator::NotEmpty,
];

/// Operators offered for number columns, in menu order
pub const NUMBER_OPERATORS: &[FilterOperator] = &[
    FilterOperator::Equals,
    FilterOperator::Gt,
    FilterOperator::Lt,
    FilterOperator::IsEmpty,
    FilterOperator::NotEmpty,
];

impl FilterOperator {
    /// Menu entries for a column type
    pub fn for_column_type(column_type: ColumnType) -> &'static [FilterOperator] {
        match column_type {
            ColumnType::Text => TEXT_OPERATORS,
            ColumnType::Number => NUMBER_OPERATORS,
        }
    }

    /// Whether the operator is meaningful for a column of `column_type`.
    ///
    /// `equals`, `contains` and `not_contains` work on any column (numbers
    /// compare through their display text); `gt`/`lt` are numeric-only.
    pub fn is_compatible_with(self, column_type: ColumnType) -> bool {
        match self {
            FilterOperator::Gt | FilterOperator::Lt => column_type == ColumnType::Number,
            FilterOperator::Equals
            | FilterOperator::Contains
            | FilterOperator::NotContains
            | FilterOperator::IsEmpty
            | FilterOperator::NotEmpty => true,
        }
    }

    pub fn requires_value(self) -> bool {
        !matches!(self, FilterOperator::IsEmpty | FilterOperator::NotEmpty)
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterOperator::Equals => "is",
            FilterOperator::Contains => "contains",
            FilterOperator::NotContains => "does not contain",
            FilterOperator::IsEmpty => "is empty",
            FilterOperator::NotEmpty => "is not empty",
            FilterOperator::Gt => ">",
            FilterOperator::Lt => "<",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::Contains => "contains",
            FilterOperator::NotContains => "not_contains",
            FilterOperator::IsEmpty => "is_empty",
            FilterOperator::NotEmpty => "not_empty",
            FilterOperator::Gt => "gt",
            FilterOperator::Lt => "lt",
        }
    }
}

impl std::str::FromStr for FilterOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equals" | "eq" => Ok(FilterOperator::Equals),
            "contains" => Ok(FilterOperator::Contains),
            "not_contains" => Ok(FilterOperator::NotContains),
            "is_empty" => Ok(FilterOperator::IsEmpty),
            "not_empty" => Ok(FilterOperator::NotEmpty),
            "gt" => Ok(FilterOperator::Gt),
            "lt" => Ok(FilterOperator::Lt),
            other => Err(format!("unknown filter operator '{}'", other)),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

/// A filter entry. Column and operator may be unset while the user is
/// still building it; such entries never reach a composed query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub column_id: Option<ColumnId>,
    pub operator: Option<FilterOperator>,
    #[serde(default)]
    pub value: String,
}

impl Filter {
    pub fn new(column_id: ColumnId, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            column_id: Some(column_id),
            operator: Some(operator),
            value: value.into(),
        }
    }

    /// Column, operator and (when the operator needs one) value are all set
    pub fn is_complete(&self) -> bool {
        match (self.column_id, self.operator) {
            (Some(_), Some(op)) => !op.requires_value() || !self.value.is_empty(),
            _ => false,
        }
    }
}

/// A sort key. `order_index` ranks precedence, lowest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sort {
    pub column_id: Option<ColumnId>,
    pub direction: SortDirection,
    pub order_index: u32,
}

impl Sort {
    pub fn new(column_id: ColumnId, direction: SortDirection, order_index: u32) -> Self {
        Self {
            column_id: Some(column_id),
            direction,
            order_index,
        }
    }
}

/// A named lens over one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub id: ViewId,
    pub table_id: TableId,
    pub name: String,
    /// Creation sequence; the earliest view of a table is its default
    pub created_seq: u64,
    #[serde(default)]
    pub hidden_column_ids: BTreeSet<ColumnId>,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub sorts: Vec<Sort>,
    #[serde(default)]
    pub search_query: String,
}

impl View {
    pub fn new(table_id: TableId, name: impl Into<String>, created_seq: u64) -> Self {
        Self {
            id: ViewId::new(),
            table_id,
            name: name.into(),
            created_seq,
            hidden_column_ids: BTreeSet::new(),
            filters: Vec::new(),
            sorts: Vec::new(),
            search_query: String::new(),
        }
    }

    /// Drop every reference to a deleted column
    pub fn forget_column(&mut self, column_id: ColumnId) {
        self.hidden_column_ids.remove(&column_id);
        self.filters.retain(|f| f.column_id != Some(column_id));
        self.sorts.retain(|s| s.column_id != Some(column_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gt_lt_are_number_only() {
        assert!(FilterOperator::Gt.is_compatible_with(ColumnType::Number));
        assert!(!FilterOperator::Gt.is_compatible_with(ColumnType::Text));
        assert!(!FilterOperator::Lt.is_compatible_with(ColumnType::Text));
        assert!(FilterOperator::Contains.is_compatible_with(ColumnType::Number));
        assert!(FilterOperator::Equals.is_compatible_with(ColumnType::Text));
    }

    #[test]
    fn test_operator_menus() {
        assert!(!TEXT_OPERATORS.contains(&FilterOperator::Gt));
        assert!(NUMBER_OPERATORS.contains(&FilterOperator::Lt));
        assert!(!NUMBER_OPERATORS.contains(&FilterOperator::Contains));
    }

    #[test]
    fn test_filter_completeness() {
        let col = ColumnId::new();
        assert!(!Filter::default().is_complete());
        assert!(!Filter::new(col, FilterOperator::Contains, "").is_complete());
        assert!(Filter::new(col, FilterOperator::Contains, "ab").is_complete());
        assert!(Filter::new(col, FilterOperator::IsEmpty, "").is_complete());
        assert!(Filter::new(col, FilterOperator::NotEmpty, "").is_complete());
    }

    #[test]
    fn test_forget_column_clears_references() {
        let col = ColumnId::new();
        let other = ColumnId::new();
        let mut view = View::new(TableId::new(), "Grid view", 0);
        view.hidden_column_ids.insert(col);
        view.filters.push(Filter::new(col, FilterOperator::Equals, "x"));
        view.filters.push(Filter::new(other, FilterOperator::Equals, "y"));
        view.sorts.push(Sort::new(col, SortDirection::Desc, 0));

        view.forget_column(col);

        assert!(view.hidden_column_ids.is_empty());
        assert_eq!(view.filters.len(), 1);
        assert!(view.sorts.is_empty());
    }

    #[test]
    fn test_operator_round_trips_through_str() {
        for op in [
            FilterOperator::Equals,
            FilterOperator::Contains,
            FilterOperator::NotContains,
            FilterOperator::IsEmpty,
            FilterOperator::NotEmpty,
            FilterOperator::Gt,
            FilterOperator::Lt,
        ] {
            assert_eq!(op.as_str().parse::<FilterOperator>(), Ok(op));
        }
    }
}
