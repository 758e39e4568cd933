//! Plain-text grid rendering
//!
//! Renders the open view as a fixed-width table:
//! - Base banner (accent colored when color is enabled)
//! - Column letters and names for visible columns
//! - Only the rows inside the current render window
//! - Active cell in `[ ]`, the edit draft with a `|` caret
//! - Status line and pending diagnostics

use std::fmt::Write;

use crate::bulk::BulkState;
use crate::grid::CursorState;
use crate::model::{AppModel, ColumnType, Filter};

const RESET: &str = "\x1b[0m";

/// Convert column index to letter(s): 0->A, 1->B, ..., 25->Z, 26->AA, etc.
pub fn column_to_letters(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// Truncate text with ellipsis if too long
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        s.chars().take(max_chars).collect()
    } else {
        let mut result: String = s.chars().take(max_chars - 1).collect();
        result.push('…');
        result
    }
}

fn pad(s: &str, width: usize) -> String {
    let text = truncate_text(s, width);
    let fill = width.saturating_sub(text.chars().count());
    format!("{}{}", text, " ".repeat(fill))
}

/// Options for [`render`]
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Characters per cell, markers included
    pub cell_width: usize,
    /// Emit ANSI color for the base accent
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cell_width: 16,
            color: false,
        }
    }
}

/// `Age > 40`, `Name contains "ada"`, `Address is empty`
fn filter_summary(model: &AppModel, filter: &Filter) -> Option<String> {
    let column = model.data.column(filter.column_id?)?;
    let operator = filter.operator?;
    Some(if !operator.requires_value() {
        format!("{} {}", column.name, operator.label())
    } else if column.column_type == ColumnType::Number {
        format!("{} {} {}", column.name, operator.label(), filter.value)
    } else {
        format!("{} {} \"{}\"", column.name, operator.label(), filter.value)
    })
}

fn status_line(model: &AppModel) -> String {
    let mut parts = vec![format!("{} rows", model.grid.address.row_count())];
    let filters: Vec<String> = model
        .view
        .filters
        .iter()
        .filter_map(|f| filter_summary(model, f))
        .collect();
    if !filters.is_empty() {
        parts.push(format!("where {}", filters.join(" and ")));
    }
    if !model.view.sorts.is_empty() {
        parts.push(format!("{} sort(s)", model.view.sorts.len()));
    }
    if !model.view.search_query.is_empty() {
        parts.push(format!("search \"{}\"", model.view.search_query));
    }
    if model.sync.pending_count() > 0 {
        parts.push(format!("{} saving", model.sync.pending_count()));
    }
    match model.bulk.state() {
        BulkState::Idle => {}
        BulkState::Running { progress, .. } => parts.push(format!("inserting {}", progress)),
        BulkState::Completed { batches, rows } => {
            parts.push(format!("inserted {} rows in {} batches", rows, batches))
        }
        BulkState::Failed {
            progress,
            rows_inserted,
            ..
        } => parts.push(format!(
            "insert failed at {} ({} rows kept)",
            progress, rows_inserted
        )),
    }
    if model.loading {
        parts.push("loading".to_string());
    }
    parts.push(model.grid.cursor.name().to_string());
    parts.join(" | ")
}

/// Render the model's current window as text
pub fn render(model: &AppModel, options: RenderOptions) -> String {
    let width = options.cell_width.max(4);
    let inner = width - 2;
    let mut out = String::new();

    let banner = match &model.base {
        Some(base) => format!("{} / {}", base.base_name, model.view.name),
        None => model.view.name.clone(),
    };
    match (&model.base, options.color) {
        (Some(base), true) => {
            let _ = writeln!(out, "{}{}{}", base.color.ansi(), banner, RESET);
        }
        _ => {
            let _ = writeln!(out, "{}", banner);
        }
    }

    if let Some(error) = &model.ui.blocking_error {
        let _ = writeln!(out, "error: {}", error);
        return out;
    }

    let address = &model.grid.address;
    let row_count = address.row_count();
    let gutter = row_count.max(1).to_string().len().max(3);

    // Column letters, then names
    let _ = write!(out, "{} ", " ".repeat(gutter));
    for col in 0..address.column_count() {
        let _ = write!(out, " {} ", pad(&column_to_letters(col), inner));
    }
    out.push('\n');
    let _ = write!(out, "{} ", " ".repeat(gutter));
    for column in address.visible_columns() {
        let _ = write!(out, " {} ", pad(&column.name, inner));
    }
    out.push('\n');

    // The windower caches offsets lazily, so work on a copy
    let mut windower = model.grid.windower.clone();
    let window = windower.window();
    let lookup = model.lookup();
    for row in &window.rows {
        let _ = write!(out, "{:>gutter$} ", row.index + 1, gutter = gutter);
        for col in 0..address.column_count() {
            let Some(cell_id) = address.resolve(row.index, col) else {
                let _ = write!(out, " {} ", " ".repeat(inner));
                continue;
            };
            let active = model
                .grid
                .cursor
                .active_cell()
                .is_some_and(|a| a.cell_id == cell_id);
            let text = match &model.grid.cursor {
                CursorState::Editing { cell, draft } if cell.cell_id == cell_id => {
                    format!("{}|", draft)
                }
                _ => lookup.display_value(cell_id),
            };
            if active {
                let _ = write!(out, "[{}]", pad(&text, inner));
            } else {
                let _ = write!(out, " {} ", pad(&text, inner));
            }
        }
        out.push('\n');
    }

    let _ = writeln!(out, "{}", status_line(model));
    for diagnostic in &model.ui.diagnostics {
        let _ = writeln!(out, "! {}", diagnostic.text);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::grid::{CellPosition, CursorEvent, GridKey};
    use crate::model::{
        BaseColor, BaseContext, Cell, CellValue, Column, ColumnType, FilterOperator, Row, RowId,
        TableData, TableId, View,
    };

    fn model() -> AppModel {
        let table_id = TableId::new();
        let view = View::new(table_id, "Grid view", 0);
        let mut model = AppModel::new(GridConfig::default(), table_id, view);
        let columns = vec![
            Column::new("Name", ColumnType::Text, 0),
            Column::new("Age", ColumnType::Number, 1),
        ];
        let rows = ["ada", "bob"]
            .iter()
            .enumerate()
            .map(|(i, name)| Row {
                id: RowId::new(),
                cells: vec![
                    Cell::new(columns[0].id, CellValue::Text(Some(name.to_string()))),
                    Cell::new(columns[1].id, CellValue::Number(Some(30.0 + i as f64))),
                ],
            })
            .collect();
        model.load_data(TableData { columns, rows });
        model
    }

    #[test]
    fn test_column_to_letters() {
        assert_eq!(column_to_letters(0), "A");
        assert_eq!(column_to_letters(25), "Z");
        assert_eq!(column_to_letters(26), "AA");
        assert_eq!(column_to_letters(52), "BA");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 5), "hell…");
        assert_eq!(truncate_text("abc", 1), "a");
    }

    #[test]
    fn test_render_marks_active_cell_and_draft() {
        let mut model = model();
        let data = model.data.clone();
        model.grid.apply(CursorEvent::Click(CellPosition::new(1, 0)), &data);
        let text = render(&model, RenderOptions::default());
        assert!(text.contains("[bob"));
        assert!(text.contains(" ada"));
        assert!(text.contains("2 rows"));

        model.grid.apply(CursorEvent::Key(GridKey::F2), &data);
        let text = render(&model, RenderOptions::default());
        assert!(text.contains("[bob|"));
        assert!(text.contains("editing"));
    }

    #[test]
    fn test_render_base_banner_color() {
        let mut model = model();
        model.base = Some(BaseContext::new("Sales", BaseColor::Green));
        let plain = render(&model, RenderOptions::default());
        assert!(plain.starts_with("Sales / Grid view\n"));
        let colored = render(
            &model,
            RenderOptions {
                color: true,
                ..RenderOptions::default()
            },
        );
        assert!(colored.starts_with("\x1b[32mSales / Grid view\x1b[0m"));
    }

    #[test]
    fn test_status_line_lists_applied_filters() {
        let mut model = model();
        let (name, age) = (model.data.columns[0].id, model.data.columns[1].id);
        model.view.filters = vec![
            Filter::new(age, FilterOperator::Gt, "40"),
            Filter::new(name, FilterOperator::Contains, "ad"),
            Filter::new(name, FilterOperator::IsEmpty, ""),
        ];
        assert!(status_line(&model)
            .contains(r#"where Age > 40 and Name contains "ad" and Name is empty"#));
    }

    #[test]
    fn test_render_blocking_error_replaces_grid() {
        let mut model = model();
        model.ui.set_blocking("Table not found");
        let text = render(&model, RenderOptions::default());
        assert!(text.contains("error: Table not found"));
        assert!(!text.contains("ada"));
    }
}
