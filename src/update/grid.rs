//! Grid input handlers
//!
//! Pointer and keyboard input runs through the cursor state machine; any
//! commit it requests is handed to the cell synchronizer.

use crate::commands::Cmd;
use crate::grid::{CommitRequest, CursorEvent};
use crate::messages::GridMsg;
use crate::model::AppModel;
use crate::sync::CommitOutcome;

/// Handle grid input messages
pub fn update_grid(model: &mut AppModel, msg: GridMsg) -> Option<Cmd> {
    match msg {
        GridMsg::Click(position) => step(model, CursorEvent::Click(position)),
        GridMsg::ClickOutside => step(model, CursorEvent::ClickOutside),
        GridMsg::Blur => step(model, CursorEvent::Blur),
        GridMsg::Key(key) => step(model, CursorEvent::Key(key)),
        GridMsg::SetDraft(text) => step(model, CursorEvent::SetDraft(text)),

        GridMsg::ToggleColumnHidden(column_id) => {
            if model.data.column(column_id).is_none() {
                tracing::warn!("toggle visibility of unknown column {}", column_id);
                return None;
            }
            let hidden = &mut model.view.hidden_column_ids;
            if !hidden.remove(&column_id) {
                hidden.insert(column_id);
            }
            model.rebuild_grid();
            Some(Cmd::SaveHiddenColumns {
                view_id: model.view.id,
                hidden: model.view.hidden_column_ids.clone(),
            })
        }

        GridMsg::MeasureRow { index, height } => {
            model.grid.windower.measure(index, height);
            None
        }
    }
}

fn step(model: &mut AppModel, event: CursorEvent) -> Option<Cmd> {
    let commit = model.grid.apply(event, &model.data)?;
    commit_cell(model, commit)
}

/// Start an optimistic commit for a state machine write
pub fn commit_cell(model: &mut AppModel, commit: CommitRequest) -> Option<Cmd> {
    let Some(column_type) = model.column_type_of(commit.cell_id) else {
        tracing::warn!("commit for cell {} outside loaded data", commit.cell_id);
        return None;
    };
    match model
        .sync
        .begin(&mut model.data, commit.cell_id, column_type, &commit.value)
    {
        CommitOutcome::Issued(request) => Some(Cmd::UpdateCell(request)),
        CommitOutcome::Rejected(err) => {
            model.ui.push_diagnostic(err.to_string());
            None
        }
        CommitOutcome::Queued(_) | CommitOutcome::Unchanged | CommitOutcome::Missing => None,
    }
}
