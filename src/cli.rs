//! Command-line argument parsing for the grid driver
//!
//! Supports:
//! - Seeding a table with typed columns and synthetic rows
//! - Applying filters, sorts and a search before rendering
//! - Replaying a key script through the grid state machine
//! - Bulk population in batches

use clap::Parser;
use std::path::PathBuf;

use crate::messages::{Msg, QueryMsg};
use crate::model::{Column, ColumnId, ColumnType, FilterOperator, SortDirection};

/// Drive a spreadsheet grid from the terminal
#[derive(Parser, Debug, Default)]
#[command(name = "gridlens", version, about = "Drive a spreadsheet grid from the terminal")]
pub struct CliArgs {
    /// Rows of synthetic data to seed
    #[arg(long, value_name = "N", default_value_t = 20)]
    pub rows: usize,

    /// Columns as a comma list of `type` or `name:type` (text, number)
    #[arg(long, value_name = "COLUMNS")]
    pub columns: Option<String>,

    /// Key script, e.g. "click:0,0 F2 x Enter Tab"
    #[arg(long, value_name = "KEYS")]
    pub script: Option<String>,

    /// Free-text search applied to the view
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Filter as `column:operator[:value]` (repeatable)
    #[arg(long = "filter", value_name = "FILTER")]
    pub filters: Vec<String>,

    /// Sort as `column:asc|desc` (repeatable, first is primary)
    #[arg(long = "sort", value_name = "SORT")]
    pub sorts: Vec<String>,

    /// Bulk insert as `<batches>x<rows>`
    #[arg(long, value_name = "BATCHESxROWS")]
    pub bulk: Option<String>,

    /// Scroll the grid by this many pixels before rendering
    #[arg(long, value_name = "PX")]
    pub scroll: Option<f64>,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show the table inside a named base
    #[arg(long, value_name = "NAME")]
    pub base: Option<String>,

    /// Color the base banner
    #[arg(long)]
    pub color: bool,

    /// Seed for synthetic data
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,
}

/// A filter referencing its column by name
#[derive(Debug, Clone, PartialEq)]
pub struct FilterArg {
    pub column: String,
    pub operator: FilterOperator,
    pub value: String,
}

/// A sort key referencing its column by name
#[derive(Debug, Clone, PartialEq)]
pub struct SortArg {
    pub column: String,
    pub direction: SortDirection,
}

/// Batches and rows per batch for a bulk insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkArg {
    pub batches: usize,
    pub rows_per_batch: usize,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub rows: usize,
    /// Columns to create; `None` keeps the store's default columns
    pub columns: Option<Vec<(String, ColumnType)>>,
    pub script: Option<String>,
    pub search: Option<String>,
    pub filters: Vec<FilterArg>,
    pub sorts: Vec<SortArg>,
    pub bulk: Option<BulkArg>,
    pub scroll: Option<f64>,
    pub config_path: Option<PathBuf>,
    pub base: Option<String>,
    pub color: bool,
    pub seed: Option<u64>,
}

fn parse_column_type(s: &str) -> Result<ColumnType, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "text" => Ok(ColumnType::Text),
        "number" => Ok(ColumnType::Number),
        other => Err(format!("unknown column type '{}'", other)),
    }
}

fn parse_columns(list: &str) -> Result<Vec<(String, ColumnType)>, String> {
    let columns = list
        .split(',')
        .filter(|item| !item.trim().is_empty())
        .enumerate()
        .map(|(i, item)| match item.split_once(':') {
            Some((name, ty)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), parse_column_type(ty)?))
            }
            Some(_) => Err(format!("column '{}' has an empty name", item)),
            None => Ok((format!("Column {}", i + 1), parse_column_type(item)?)),
        })
        .collect::<Result<Vec<_>, _>>()?;
    if columns.is_empty() {
        return Err("--columns needs at least one column".to_string());
    }
    Ok(columns)
}

fn parse_filter(arg: &str) -> Result<FilterArg, String> {
    let mut parts = arg.splitn(3, ':');
    let (Some(column), Some(op)) = (parts.next(), parts.next()) else {
        return Err(format!("filter '{}': expected column:operator[:value]", arg));
    };
    let operator: FilterOperator = op.parse()?;
    let value = parts.next().unwrap_or_default().to_string();
    if operator.requires_value() && value.is_empty() {
        return Err(format!("filter '{}': operator {} needs a value", arg, op));
    }
    Ok(FilterArg {
        column: column.to_string(),
        operator,
        value,
    })
}

fn parse_sort(arg: &str) -> Result<SortArg, String> {
    let (column, direction) = match arg.rsplit_once(':') {
        Some((column, dir)) => (column, dir.parse()?),
        None => (arg, SortDirection::Asc),
    };
    Ok(SortArg {
        column: column.to_string(),
        direction,
    })
}

fn parse_bulk(arg: &str) -> Result<BulkArg, String> {
    let (batches, rows) = arg
        .to_ascii_lowercase()
        .split_once('x')
        .and_then(|(b, r)| Some((b.trim().parse().ok()?, r.trim().parse().ok()?)))
        .ok_or_else(|| format!("bulk '{}': expected <batches>x<rows>", arg))?;
    if batches == 0 || rows == 0 {
        return Err(format!("bulk '{}': batches and rows must be positive", arg));
    }
    Ok(BulkArg {
        batches,
        rows_per_batch: rows,
    })
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let columns = self.columns.as_deref().map(parse_columns).transpose()?;
        let filters = self
            .filters
            .iter()
            .map(|f| parse_filter(f))
            .collect::<Result<Vec<_>, _>>()?;
        let sorts = self
            .sorts
            .iter()
            .map(|s| parse_sort(s))
            .collect::<Result<Vec<_>, _>>()?;
        let bulk = self.bulk.as_deref().map(parse_bulk).transpose()?;
        if let Some(px) = self.scroll {
            if !px.is_finite() {
                return Err("--scroll must be a finite number".to_string());
            }
        }

        Ok(StartupConfig {
            rows: self.rows,
            columns,
            script: self.script,
            search: self.search,
            filters,
            sorts,
            bulk,
            scroll: self.scroll,
            config_path: self.config,
            base: self.base,
            color: self.color,
            seed: self.seed,
        })
    }
}

fn column_named(columns: &[Column], name: &str) -> Result<ColumnId, String> {
    columns
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .map(|c| c.id)
        .ok_or_else(|| format!("no column named '{}'", name))
}

impl StartupConfig {
    /// Builder messages that apply the requested filters and sorts to the
    /// loaded columns. The search is left out since it goes through the
    /// debounced search box.
    pub fn query_msgs(&self, columns: &[Column]) -> Result<Vec<Msg>, String> {
        let mut msgs = Vec::new();
        for (index, filter) in self.filters.iter().enumerate() {
            let column_id = column_named(columns, &filter.column)?;
            msgs.extend([
                QueryMsg::AddFilter,
                QueryMsg::SetFilterColumn { index, column_id },
                QueryMsg::SetFilterOperator {
                    index,
                    operator: filter.operator,
                },
                QueryMsg::SetFilterValue {
                    index,
                    value: filter.value.clone(),
                },
            ]);
        }
        if !self.filters.is_empty() {
            msgs.push(QueryMsg::ApplyFilters);
        }
        for (index, sort) in self.sorts.iter().enumerate() {
            let column_id = column_named(columns, &sort.column)?;
            msgs.extend([
                QueryMsg::AddSort(Some(column_id)),
                QueryMsg::SetSortDirection {
                    index,
                    direction: sort.direction,
                },
            ]);
        }
        if !self.sorts.is_empty() {
            msgs.push(QueryMsg::ApplySorts);
        }
        Ok(msgs.into_iter().map(Msg::Query).collect())
    }
}
