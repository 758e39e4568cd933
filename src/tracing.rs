//! Tracing setup and state snapshots for development diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=cursor=debug` - cursor transitions only
//! - `RUST_LOG=gridlens::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/gridlens/logs/gridlens.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::grid::{CursorState, GridState};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`. File logging
/// writes to `~/.config/gridlens/logs/gridlens.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(
                logs_dir,
                crate::config_paths::LOG_FILE_PREFIX,
            );
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of the grid cursor for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct CursorSnapshot {
    pub state: &'static str,
    pub position: Option<(usize, usize)>,
    pub draft_len: Option<usize>,
    pub scroll_offset: f64,
}

impl CursorSnapshot {
    pub fn from_grid(grid: &GridState) -> Self {
        let position = grid
            .cursor
            .active_cell()
            .map(|a| (a.row_index(), a.column_index()));
        let draft_len = match &grid.cursor {
            CursorState::Editing { draft, .. } => Some(draft.chars().count()),
            _ => None,
        };
        Self {
            state: grid.cursor.name(),
            position,
            draft_len,
            scroll_offset: grid.windower.scroll_offset(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &CursorSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.state != other.state {
            changes.push(format!("{} → {}", self.state, other.state));
        }
        if self.position != other.position {
            let fmt = |p: Option<(usize, usize)>| match p {
                Some((r, c)) => format!("({},{})", r, c),
                None => "-".to_string(),
            };
            changes.push(format!("{} → {}", fmt(self.position), fmt(other.position)));
        }
        if self.draft_len != other.draft_len && self.state == other.state {
            changes.push(format!(
                "draft {} → {} chars",
                self.draft_len.unwrap_or(0),
                other.draft_len.unwrap_or(0)
            ));
        }
        if self.scroll_offset != other.scroll_offset {
            changes.push(format!(
                "scroll {} → {}",
                self.scroll_offset, other.scroll_offset
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
