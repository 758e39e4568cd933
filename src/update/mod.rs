//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod bulk;
mod grid;
mod query;
mod sync;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::CursorSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::{report_store_error, update_app};
pub use bulk::update_bulk;
pub use grid::{commit_cell, update_grid};
pub use query::update_query;
pub use sync::update_sync;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let result = match msg {
        Msg::Grid(m) => grid::update_grid(model, m),
        Msg::Query(m) => query::update_query(model, m),
        Msg::Sync(m) => sync::update_sync(model, m),
        Msg::Bulk(m) => bulk::update_bulk(model, m),
        Msg::App(m) => app::update_app(model, m),
    };

    model.ui.prune_expired();
    result
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after cursor state and logs diffs for debugging.
/// Row measurements arrive once per rendered row and are not logged.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    use crate::messages::GridMsg;

    let is_noisy = matches!(&msg, Msg::Grid(GridMsg::MeasureRow { .. }));

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = CursorSnapshot::from_grid(&model.grid);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = CursorSnapshot::from_grid(&model.grid);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "cursor", %diff, "state changed");
    }

    result
}

/// Get a display name for a message type
///
/// Uses Debug formatting to include variant names and arguments, except for
/// loaded data which is summarized.
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::{AppMsg, QueryMsg};

    match msg {
        Msg::Grid(m) => format!("Grid::{:?}", m),
        Msg::Sync(m) => format!("Sync::{:?}", m),
        Msg::Bulk(m) => format!("Bulk::{:?}", m),
        Msg::App(AppMsg::TableDataLoaded(Ok(data))) => {
            format!("App::TableDataLoaded({} rows)", data.row_count())
        }
        Msg::Query(QueryMsg::Submitted(Ok(data))) => {
            format!("Query::Submitted({} rows)", data.row_count())
        }
        Msg::Query(m) => format!("Query::{:?}", m),
        Msg::App(m) => format!("App::{:?}", m),
    }
}
