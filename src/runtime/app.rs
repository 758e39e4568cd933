//! Command execution against a store
//!
//! Every `Cmd` that needs the store (or a timer) runs on its own worker
//! thread and reports back with a `Msg` over a channel. The model is only
//! touched on the calling thread, inside `update`.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Result};

use crate::commands::Cmd;
use crate::messages::{AppMsg, BulkMsg, Msg, QueryMsg, SyncMsg};
use crate::model::AppModel;
use crate::store::GridStore;
use crate::update::update;

/// Longest wait for a single worker before giving up on idling
pub const WORKER_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Runtime<S: GridStore + 'static> {
    store: Arc<S>,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    /// Workers spawned whose result message has not been handled yet
    in_flight: usize,
}

impl<S: GridStore + 'static> Runtime<S> {
    pub fn new(store: Arc<S>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            store,
            msg_tx,
            msg_rx,
            in_flight: 0,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Run one message through `update` and start whatever it asks for
    pub fn dispatch(&mut self, model: &mut AppModel, msg: Msg) {
        if let Some(cmd) = update(model, msg) {
            self.process_cmd(cmd);
        }
    }

    fn spawn<F>(&mut self, delay_ms: u64, task: F)
    where
        F: FnOnce(&S) -> Msg + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.msg_tx.clone();
        let store = Arc::clone(&self.store);
        thread::spawn(move || {
            if delay_ms > 0 {
                thread::sleep(Duration::from_millis(delay_ms));
            }
            let _ = tx.send(task(&store));
        });
    }

    pub fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }

            Cmd::FetchTableData { table_id, view_id } => self.spawn(0, move |store| {
                Msg::App(AppMsg::TableDataLoaded(
                    store.get_table_data(table_id, view_id),
                ))
            }),

            Cmd::UpdateCell(request) => self.spawn(0, move |store| {
                let result = store.update_cell(request.cell_id, &request.value, request.column_type);
                Msg::Sync(SyncMsg::CellUpdated {
                    request_id: request.request_id,
                    cell_id: request.cell_id,
                    result,
                })
            }),

            Cmd::DebouncedSearch { revision, delay_ms } => self.spawn(delay_ms, move |_| {
                Msg::Query(QueryMsg::SearchSettled { revision })
            }),

            Cmd::SubmitQuery {
                table_id,
                view_id,
                query,
            } => self.spawn(0, move |store| {
                let result = store
                    .save_query(view_id, &query)
                    .and_then(|()| store.get_table_data(table_id, view_id));
                Msg::Query(QueryMsg::Submitted(result))
            }),

            Cmd::InsertRowBatch {
                table_id,
                batch,
                rows,
                delay_ms,
            } => self.spawn(delay_ms, move |store| {
                tracing::debug!("inserting batch {} ({} rows)", batch, rows);
                Msg::Bulk(BulkMsg::BatchCompleted {
                    batch,
                    result: store.add_rows(table_id, rows),
                })
            }),

            Cmd::SaveHiddenColumns { view_id, hidden } => self.spawn(0, move |store| {
                Msg::App(AppMsg::HiddenColumnsSaved(
                    store.set_hidden_columns(view_id, &hidden),
                ))
            }),

            Cmd::AddRow { table_id } => self.spawn(0, move |store| {
                table_changed("Add row", store.add_row(table_id).map(|_| ()))
            }),

            Cmd::DeleteRow { row_id } => self.spawn(0, move |store| {
                table_changed("Delete row", store.delete_row(row_id))
            }),

            Cmd::AddColumn { table_id } => self.spawn(0, move |store| {
                table_changed("Add column", store.add_column(table_id).map(|_| ()))
            }),

            Cmd::DeleteColumn { column_id } => self.spawn(0, move |store| {
                table_changed("Delete column", store.delete_column(column_id))
            }),

            Cmd::UpdateColumn {
                column_id,
                name,
                column_type,
            } => self.spawn(0, move |store| {
                let result = store
                    .update_column(column_id, name.as_deref(), column_type)
                    .map(|_| ());
                table_changed("Update column", result)
            }),
        }
    }

    /// Handle results as they arrive until no worker is outstanding.
    /// Returns the number of messages handled.
    pub fn run_until_idle(&mut self, model: &mut AppModel) -> Result<usize> {
        let mut handled = 0;
        while self.in_flight > 0 {
            let msg = match self.msg_rx.recv_timeout(WORKER_TIMEOUT) {
                Ok(msg) => msg,
                Err(RecvTimeoutError::Timeout) => {
                    bail!(
                        "timed out waiting for {} pending operation(s)",
                        self.in_flight
                    )
                }
                Err(RecvTimeoutError::Disconnected) => bail!("worker channel closed"),
            };
            self.in_flight -= 1;
            handled += 1;
            self.dispatch(model, msg);
        }
        Ok(handled)
    }
}

fn table_changed(operation: &'static str, result: crate::store::StoreResult<()>) -> Msg {
    Msg::App(AppMsg::TableChanged { operation, result })
}
