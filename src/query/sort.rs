//! Multi-key row ordering and the sort builder

use std::cmp::Ordering;

use crate::model::table::{CellValue, Column, ColumnId, Row};
use crate::model::view::{Sort, SortDirection};

/// Compare two cell values for one sort key.
///
/// Nulls go last in both directions; only the non-null comparison is
/// reversed for `desc`. Numbers compare numerically, everything else by
/// display text ignoring case, with case only breaking ties (lowercase
/// first).
pub fn compare_values(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    let ord = match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => compare_text(&a.display(), &b.display()),
    };

    match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Compare rows key by key; the first non-equal key decides
pub fn compare_rows(a: &Row, b: &Row, keys: &[(&Column, SortDirection)]) -> Ordering {
    for (column, direction) in keys {
        let ord = compare_values(&a.value_for(column), &b.value_for(column), *direction);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Draft sort keys; `order_index` always equals the entry's position
#[derive(Debug, Clone, Default)]
pub struct SortBuilder {
    entries: Vec<Sort>,
}

impl SortBuilder {
    pub fn from_sorts(mut entries: Vec<Sort>) -> Self {
        entries.sort_by_key(|s| s.order_index);
        let mut builder = Self { entries };
        builder.reindex();
        builder
    }

    pub fn entries(&self) -> &[Sort] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn reindex(&mut self) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.order_index = i as u32;
        }
    }

    /// Append a key (ascending) and return its index
    pub fn add(&mut self, column_id: Option<ColumnId>) -> usize {
        self.entries.push(Sort {
            column_id,
            direction: SortDirection::Asc,
            order_index: self.entries.len() as u32,
        });
        self.entries.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Option<Sort> {
        if index >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(index);
        self.reindex();
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn set_column(&mut self, index: usize, column_id: ColumnId) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.column_id = Some(column_id);
        }
    }

    pub fn set_direction(&mut self, index: usize, direction: SortDirection) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.direction = direction;
        }
    }

    /// Raise a key's precedence by one
    pub fn move_up(&mut self, index: usize) {
        if index > 0 && index < self.entries.len() {
            self.entries.swap(index - 1, index);
            self.reindex();
        }
    }

    /// Lower a key's precedence by one
    pub fn move_down(&mut self, index: usize) {
        if index + 1 < self.entries.len() {
            self.entries.swap(index, index + 1);
            self.reindex();
        }
    }

    /// Forget keys whose column no longer exists
    pub fn revalidate(&mut self, columns: &[Column]) {
        let before = self.entries.len();
        self.entries
            .retain(|s| s.column_id.map_or(true, |id| columns.iter().any(|c| c.id == id)));
        if self.entries.len() != before {
            self.reindex();
        }
    }

    pub fn can_apply(&self) -> bool {
        self.entries.iter().all(|s| s.column_id.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::{Cell, ColumnType, RowId};

    fn number_rows(column: &Column, values: &[Option<f64>]) -> Vec<Row> {
        values
            .iter()
            .map(|v| Row {
                id: RowId::new(),
                cells: vec![Cell::new(column.id, CellValue::Number(*v))],
            })
            .collect()
    }

    #[test]
    fn test_nulls_sort_last_in_original_order() {
        let col = Column::new("N", ColumnType::Number, 0);
        let rows = number_rows(&col, &[None, Some(3.0), Some(1.0), None, Some(2.0)]);
        let null_ids = [rows[0].id, rows[3].id];

        let mut sorted = rows.clone();
        sorted.sort_by(|a, b| compare_rows(a, b, &[(&col, SortDirection::Asc)]));

        let values: Vec<Option<f64>> = sorted.iter().map(|r| r.value_for(&col).as_number()).collect();
        assert_eq!(values, vec![Some(1.0), Some(2.0), Some(3.0), None, None]);
        assert_eq!(sorted[3].id, null_ids[0]);
        assert_eq!(sorted[4].id, null_ids[1]);
    }

    #[test]
    fn test_nulls_last_even_descending() {
        let col = Column::new("N", ColumnType::Number, 0);
        let mut rows = number_rows(&col, &[None, Some(1.0), Some(5.0)]);
        rows.sort_by(|a, b| compare_rows(a, b, &[(&col, SortDirection::Desc)]));
        let values: Vec<Option<f64>> = rows.iter().map(|r| r.value_for(&col).as_number()).collect();
        assert_eq!(values, vec![Some(5.0), Some(1.0), None]);
    }

    #[test]
    fn test_secondary_key_breaks_ties() {
        let group = Column::new("G", ColumnType::Text, 0);
        let n = Column::new("N", ColumnType::Number, 1);
        let row = |g: &str, v: f64| Row {
            id: RowId::new(),
            cells: vec![
                Cell::new(group.id, CellValue::Text(Some(g.into()))),
                Cell::new(n.id, CellValue::Number(Some(v))),
            ],
        };
        let mut rows = vec![row("b", 1.0), row("a", 2.0), row("a", 9.0), row("b", 0.0)];
        let keys = [(&group, SortDirection::Asc), (&n, SortDirection::Desc)];
        rows.sort_by(|a, b| compare_rows(a, b, &keys));
        let out: Vec<(String, f64)> = rows
            .iter()
            .map(|r| {
                (
                    r.value_for(&group).display(),
                    r.value_for(&n).as_number().unwrap_or_default(),
                )
            })
            .collect();
        assert_eq!(
            out,
            vec![
                ("a".to_string(), 9.0),
                ("a".to_string(), 2.0),
                ("b".to_string(), 1.0),
                ("b".to_string(), 0.0)
            ]
        );
    }

    #[test]
    fn test_text_comparison_ignores_case_first() {
        let apple = CellValue::Text(Some("apple".into()));
        let banana = CellValue::Text(Some("Banana".into()));
        assert_eq!(compare_values(&apple, &banana, SortDirection::Asc), Ordering::Less);
        assert_eq!(compare_values(&apple, &banana, SortDirection::Desc), Ordering::Greater);

        // Case only breaks ties
        let upper = CellValue::Text(Some("Apple".into()));
        assert_eq!(compare_values(&apple, &upper, SortDirection::Asc), Ordering::Less);
        assert_eq!(compare_values(&apple, &apple, SortDirection::Asc), Ordering::Equal);
    }

    #[test]
    fn test_builder_keeps_order_index_in_sync() {
        let (a, b, c) = (ColumnId::new(), ColumnId::new(), ColumnId::new());
        let mut builder = SortBuilder::default();
        builder.add(Some(a));
        builder.add(Some(b));
        builder.add(Some(c));

        builder.move_up(2);
        let order: Vec<_> = builder.entries().iter().map(|s| s.column_id).collect();
        assert_eq!(order, vec![Some(a), Some(c), Some(b)]);

        builder.remove(0);
        let idx: Vec<u32> = builder.entries().iter().map(|s| s.order_index).collect();
        assert_eq!(idx, vec![0, 1]);
        assert_eq!(builder.entries()[0].column_id, Some(c));
    }

    #[test]
    fn test_builder_can_apply() {
        let mut builder = SortBuilder::default();
        builder.add(None);
        assert!(!builder.can_apply());
        builder.set_column(0, ColumnId::new());
        assert!(builder.can_apply());
    }
}
