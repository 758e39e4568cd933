//! Cell commit result handlers

use crate::commands::Cmd;
use crate::messages::SyncMsg;
use crate::model::AppModel;

use super::app::report_store_error;

pub fn update_sync(model: &mut AppModel, msg: SyncMsg) -> Option<Cmd> {
    match msg {
        SyncMsg::CellUpdated {
            request_id,
            cell_id,
            result,
        } => {
            match result {
                Ok(cell) => {
                    tracing::debug!("cell {} confirmed (request {})", cell_id, request_id);
                    model.sync.confirm(&mut model.data, request_id, cell);
                }
                Err(err) => {
                    model.sync.rollback(&mut model.data, cell_id, request_id);
                    report_store_error(model, "Cell update failed", &err);
                }
            }
            model.sync.next_request(cell_id).map(Cmd::UpdateCell)
        }
    }
}
