//! Bulk insertion handlers

use crate::bulk::BulkStep;
use crate::commands::Cmd;
use crate::messages::BulkMsg;
use crate::model::AppModel;

use super::app::report_store_error;

pub fn update_bulk(model: &mut AppModel, msg: BulkMsg) -> Option<Cmd> {
    match msg {
        BulkMsg::Start {
            total_batches,
            rows_per_batch,
        } => {
            let Some(step) = model.bulk.start(total_batches, rows_per_batch) else {
                if model.bulk.is_running() {
                    model.ui.push_diagnostic("A bulk insert is already running");
                }
                return None;
            };
            perform(model, step)
        }

        BulkMsg::BatchCompleted { batch, result } => match result {
            Ok(rows) => {
                let step = model.bulk.batch_succeeded(batch, rows);
                perform(model, step)
            }
            Err(err) => {
                model.bulk.batch_failed(batch, err.to_string());
                report_store_error(model, &format!("Bulk insert stopped at batch {}", batch), &err);
                // Rows from completed batches stay; show them
                Some(model.fetch_cmd())
            }
        },
    }
}

fn perform(model: &mut AppModel, step: BulkStep) -> Option<Cmd> {
    match step {
        BulkStep::Insert {
            batch,
            rows,
            delay_ms,
        } => Some(Cmd::InsertRowBatch {
            table_id: model.table_id,
            batch,
            rows,
            delay_ms,
        }),
        BulkStep::Refresh => Some(model.fetch_cmd()),
        BulkStep::Stop => None,
    }
}
