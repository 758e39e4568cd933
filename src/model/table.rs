//! Table data types: columns, rows, cells and their typed values
//!
//! A cell stores its value in one of two slots (`value_text` / `value_number`);
//! which one is live is decided by the owning column's [`ColumnType`]. All
//! reads and writes go through [`CellValue`] so every site handles both
//! column types exhaustively.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

entity_id!(
    /// Identifies a table
    TableId
);
entity_id!(
    /// Identifies a column within a table
    ColumnId
);
entity_id!(
    /// Identifies a row within a table
    RowId
);
entity_id!(
    /// Identifies a single cell; stable across value edits
    CellId
);

/// Column value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ColumnType::Text),
            "number" => Ok(ColumnType::Number),
            other => Err(format!("unknown column type '{}'", other)),
        }
    }
}

/// Local validation failure, raised before any request reaches the store
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("'{0}' is not a valid number")]
    NotANumber(String),
    #[error("{0} cannot be empty")]
    Empty(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// A typed cell value, tagged by the column type that owns it
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(Option<String>),
    Number(Option<f64>),
}

impl CellValue {
    /// Parse user input for a column of the given type
    ///
    /// Number columns accept surrounding whitespace; blank input clears the
    /// value. Non-finite results (`NaN`, `inf`) are rejected.
    pub fn parse(input: &str, column_type: ColumnType) -> Result<Self, ValidationError> {
        match column_type {
            ColumnType::Text => Ok(CellValue::Text(Some(input.to_string()))),
            ColumnType::Number => parse_number(input).map(CellValue::Number),
        }
    }

    pub fn empty(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Text => CellValue::Text(None),
            ColumnType::Number => CellValue::Number(None),
        }
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            CellValue::Text(_) => ColumnType::Text,
            CellValue::Number(_) => ColumnType::Number,
        }
    }

    /// True for null values and empty strings
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Text(None) | CellValue::Number(None) => true,
            CellValue::Text(Some(s)) => s.is_empty(),
            CellValue::Number(Some(_)) => false,
        }
    }

    /// True only for null values (an empty string is not null)
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Text(None) | CellValue::Number(None))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => *n,
            CellValue::Text(_) => None,
        }
    }

    /// Text shown in the grid and used as the initial edit draft
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone().unwrap_or_default(),
            CellValue::Number(Some(n)) => format_number(*n),
            CellValue::Number(None) => String::new(),
        }
    }
}

/// Parse a numeric cell input. Blank input means "no value".
pub fn parse_number(input: &str) -> Result<Option<f64>, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(ValidationError::NotANumber(input.to_string())),
    }
}

/// Format a number the way the grid displays it (`42`, not `42.0`)
pub fn format_number(n: f64) -> String {
    format!("{}", n)
}

/// Column definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Left-to-right display order, unique per table
    pub position: u32,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType, position: u32) -> Self {
        Self {
            id: ColumnId::new(),
            name: name.into(),
            column_type,
            position,
        }
    }
}

/// One cell of a row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    pub column_id: ColumnId,
    pub value_text: Option<String>,
    pub value_number: Option<f64>,
}

impl Cell {
    /// Create a cell holding `value`
    pub fn new(column_id: ColumnId, value: CellValue) -> Self {
        let mut cell = Self {
            id: CellId::new(),
            column_id,
            value_text: None,
            value_number: None,
        };
        cell.set_value(value);
        cell
    }

    /// Read the value through the owning column's type
    pub fn value(&self, column_type: ColumnType) -> CellValue {
        match column_type {
            ColumnType::Text => CellValue::Text(self.value_text.clone()),
            ColumnType::Number => CellValue::Number(self.value_number),
        }
    }

    /// Write a value, keeping the inactive slot null
    pub fn set_value(&mut self, value: CellValue) {
        match value {
            CellValue::Text(text) => {
                self.value_text = text;
                self.value_number = None;
            }
            CellValue::Number(n) => {
                self.value_number = n;
                self.value_text = None;
            }
        }
    }
}

/// A row and its cells, ordered by column position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn cell_for(&self, column_id: ColumnId) -> Option<&Cell> {
        self.cells.iter().find(|c| c.column_id == column_id)
    }

    /// Value of the cell in `column`, or that column's empty value when the
    /// row has no cell for it
    pub fn value_for(&self, column: &Column) -> CellValue {
        self.cell_for(column.id)
            .map(|c| c.value(column.column_type))
            .unwrap_or_else(|| CellValue::empty(column.column_type))
    }

    /// A row is complete when it has exactly one cell per column
    pub fn is_complete(&self, columns: &[Column]) -> bool {
        self.cells.len() == columns.len()
            && columns
                .iter()
                .all(|col| self.cells.iter().filter(|c| c.column_id == col.id).count() == 1)
    }
}

/// Columns and rows of a table as seen through one view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl TableData {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column(&self, column_id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn find_cell(&self, cell_id: CellId) -> Option<&Cell> {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .find(|c| c.id == cell_id)
    }

    pub fn find_cell_mut(&mut self, cell_id: CellId) -> Option<&mut Cell> {
        self.rows
            .iter_mut()
            .flat_map(|r| r.cells.iter_mut())
            .find(|c| c.id == cell_id)
    }

    /// Current value of a cell, typed by its column
    pub fn cell_value(&self, cell_id: CellId) -> Option<CellValue> {
        let cell = self.find_cell(cell_id)?;
        let column = self.column(cell.column_id)?;
        Some(cell.value(column.column_type))
    }

    /// Overwrite a cell's value. Returns false if the cell is not loaded.
    pub fn set_cell_value(&mut self, cell_id: CellId, value: CellValue) -> bool {
        match self.find_cell_mut(cell_id) {
            Some(cell) => {
                cell.set_value(value);
                true
            }
            None => false,
        }
    }

    /// Replace a cell wholesale with an authoritative copy from the store
    pub fn replace_cell(&mut self, authoritative: Cell) -> bool {
        match self.find_cell_mut(authoritative.id) {
            Some(cell) => {
                *cell = authoritative;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_accepts_trimmed_input() {
        assert_eq!(parse_number(" 42 "), Ok(Some(42.0)));
        assert_eq!(parse_number("-3.5"), Ok(Some(-3.5)));
    }

    #[test]
    fn test_parse_number_blank_clears() {
        assert_eq!(parse_number(""), Ok(None));
        assert_eq!(parse_number("   "), Ok(None));
    }

    #[test]
    fn test_parse_number_rejects_garbage_and_non_finite() {
        assert!(parse_number("abc").is_err());
        assert!(parse_number("12abc").is_err());
        assert!(parse_number("NaN").is_err());
        assert!(parse_number("inf").is_err());
    }

    #[test]
    fn test_format_number_drops_trailing_zero() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(42.5), "42.5");
    }

    #[test]
    fn test_set_value_keeps_inactive_slot_null() {
        let mut cell = Cell::new(ColumnId::new(), CellValue::Text(Some("hi".into())));
        cell.set_value(CellValue::Number(Some(7.0)));
        assert_eq!(cell.value_text, None);
        assert_eq!(cell.value_number, Some(7.0));

        cell.set_value(CellValue::Text(Some("back".into())));
        assert_eq!(cell.value_number, None);
        assert_eq!(cell.value_text.as_deref(), Some("back"));
    }

    #[test]
    fn test_cell_value_empty_vs_null() {
        assert!(CellValue::Text(Some(String::new())).is_empty());
        assert!(!CellValue::Text(Some(String::new())).is_null());
        assert!(CellValue::Number(None).is_null());
        assert!(!CellValue::Number(Some(0.0)).is_empty());
    }

    #[test]
    fn test_row_completeness() {
        let a = Column::new("A", ColumnType::Text, 0);
        let b = Column::new("B", ColumnType::Number, 1);
        let row = Row {
            id: RowId::new(),
            cells: vec![Cell::new(a.id, CellValue::empty(ColumnType::Text))],
        };
        assert!(!row.is_complete(&[a.clone(), b.clone()]));

        let row = Row {
            id: RowId::new(),
            cells: vec![
                Cell::new(a.id, CellValue::empty(ColumnType::Text)),
                Cell::new(b.id, CellValue::empty(ColumnType::Number)),
            ],
        };
        assert!(row.is_complete(&[a, b]));
    }

    #[test]
    fn test_column_type_serde_lowercase() {
        let json = serde_json::to_string(&ColumnType::Number).unwrap();
        assert_eq!(json, "\"number\"");
    }
}
