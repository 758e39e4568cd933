//! App message handlers (data loading, layout, table structure)

use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::model::AppModel;
use crate::store::{ErrorSeverity, StoreError};

/// Surface a store failure according to its severity
///
/// Not-found and authorization failures block; everything else becomes a
/// transient diagnostic.
pub fn report_store_error(model: &mut AppModel, context: &str, err: &StoreError) {
    let text = format!("{}: {}", context, err);
    tracing::warn!("{}", text);
    match err.severity() {
        ErrorSeverity::Blocking => model.ui.set_blocking(text),
        ErrorSeverity::Validation | ErrorSeverity::Transient => model.ui.push_diagnostic(text),
    }
}

/// Handle app messages (data loading, layout, table structure)
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Refresh => Some(model.fetch_cmd()),

        AppMsg::TableDataLoaded(result) => {
            match result {
                Ok(data) => model.load_data(data),
                Err(err) => {
                    model.loading = false;
                    report_store_error(model, "Failed to load table", &err);
                }
            }
            None
        }

        AppMsg::Resize { height } => {
            model.grid.windower.set_viewport_height(height);
            None
        }

        AppMsg::Scroll(delta) => {
            model.grid.windower.scroll_by(delta);
            None
        }

        AppMsg::ScrollTo(offset) => {
            model.grid.windower.set_scroll_offset(offset);
            None
        }

        AppMsg::EnterBase(context) => {
            tracing::debug!("entering base '{}' ({})", context.base_name, context.color);
            model.base = Some(context);
            None
        }

        AppMsg::LeaveBase => {
            model.base = None;
            None
        }

        AppMsg::AddRow => Some(Cmd::AddRow {
            table_id: model.table_id,
        }),

        AppMsg::DeleteRow(row_id) => Some(Cmd::DeleteRow { row_id }),

        AppMsg::AddColumn => Some(Cmd::AddColumn {
            table_id: model.table_id,
        }),

        AppMsg::DeleteColumn(column_id) => Some(Cmd::DeleteColumn { column_id }),

        AppMsg::UpdateColumn {
            column_id,
            name,
            column_type,
        } => {
            if name.is_none() && column_type.is_none() {
                model.ui.push_diagnostic("No updates provided");
                return None;
            }
            if name.as_deref().is_some_and(|n| n.trim().is_empty()) {
                model.ui.push_diagnostic("Column name cannot be empty");
                return None;
            }
            Some(Cmd::UpdateColumn {
                column_id,
                name,
                column_type,
            })
        }

        AppMsg::TableChanged { operation, result } => match result {
            Ok(()) => {
                tracing::debug!("{} done, reloading", operation);
                Some(model.fetch_cmd())
            }
            Err(err) => {
                report_store_error(model, &format!("{} failed", operation), &err);
                None
            }
        },

        AppMsg::HiddenColumnsSaved(result) => {
            if let Err(err) = result {
                report_store_error(model, "Failed to save column visibility", &err);
            }
            None
        }

        AppMsg::DismissError => {
            model.ui.dismiss_blocking();
            None
        }
    }
}
