//! Optimistic cell commits
//!
//! A commit runs in two phases. [`CellSynchronizer::begin`] validates the
//! input, writes it into the local cache and hands back the request to send.
//! When the store answers, [`CellSynchronizer::confirm`] or
//! [`CellSynchronizer::rollback`] settles it. Rollback is the only path that
//! restores a pre-edit value.
//!
//! Only one request per cell is in flight at a time. Later edits to the same
//! cell are applied locally right away but their requests wait in order and
//! are released by [`CellSynchronizer::next_request`] once the one ahead
//! settles, so the store sees them in the order they were made. Each commit
//! remembers the value it replaced; settling a commit that is not the newest
//! only rewires what the next one will fall back to, so the newest optimistic
//! value stays visible.

use std::collections::HashMap;

use crate::model::table::{Cell, CellId, CellValue, ColumnType, TableData, ValidationError};

/// Update request handed to the runtime
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCellRequest {
    pub request_id: u64,
    pub cell_id: CellId,
    /// Raw input as typed; the store parses it for `column_type`
    pub value: String,
    pub column_type: ColumnType,
}

/// Result of starting a commit
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// Same as the last known value; nothing sent
    Unchanged,
    /// Input failed local validation; nothing sent, cache untouched
    Rejected(ValidationError),
    /// Cell is not in the loaded data
    Missing,
    /// Cache updated optimistically; send this request
    Issued(UpdateCellRequest),
    /// Cache updated optimistically; the request with this id waits for an
    /// earlier one on the same cell
    Queued(u64),
}

#[derive(Debug, Clone)]
struct PendingCommit {
    request_id: u64,
    column_type: ColumnType,
    /// Value to restore if this commit fails and nothing newer is pending
    previous: CellValue,
    /// Request not yet handed to the runtime
    unsent: Option<UpdateCellRequest>,
}

#[derive(Debug, Clone, Default)]
pub struct CellSynchronizer {
    /// Per cell, oldest first. The head is the request in flight.
    pending: HashMap<CellId, Vec<PendingCommit>>,
    next_request: u64,
}

/// Equality as seen by the user: a null text cell and an empty string are
/// the same value
fn same_value(a: &CellValue, b: &CellValue) -> bool {
    match (a, b) {
        (CellValue::Text(_), CellValue::Text(_)) => a.display() == b.display(),
        (CellValue::Number(x), CellValue::Number(y)) => x == y,
        _ => false,
    }
}

impl CellSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }

    pub fn is_pending(&self, cell_id: CellId) -> bool {
        self.pending.contains_key(&cell_id)
    }

    /// Phase one: validate, compare with the last known value, apply locally
    pub fn begin(
        &mut self,
        cache: &mut TableData,
        cell_id: CellId,
        column_type: ColumnType,
        input: &str,
    ) -> CommitOutcome {
        let Some(known) = cache.cell_value(cell_id) else {
            tracing::warn!("commit for unknown cell {}", cell_id);
            return CommitOutcome::Missing;
        };

        let value = match CellValue::parse(input, column_type) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("rejected commit for cell {}: {}", cell_id, err);
                return CommitOutcome::Rejected(err);
            }
        };

        if same_value(&known, &value) {
            tracing::debug!("commit for cell {} unchanged, skipping", cell_id);
            return CommitOutcome::Unchanged;
        }

        self.next_request += 1;
        let request = UpdateCellRequest {
            request_id: self.next_request,
            cell_id,
            value: input.to_string(),
            column_type,
        };
        cache.set_cell_value(cell_id, value);

        let queue = self.pending.entry(cell_id).or_default();
        let in_flight = !queue.is_empty();
        queue.push(PendingCommit {
            request_id: request.request_id,
            column_type,
            previous: known,
            unsent: in_flight.then(|| request.clone()),
        });

        if in_flight {
            tracing::debug!(
                "request {} for cell {} queued behind {}",
                request.request_id,
                cell_id,
                queue[0].request_id
            );
            CommitOutcome::Queued(request.request_id)
        } else {
            CommitOutcome::Issued(request)
        }
    }

    /// Release the waiting request for a cell whose previous request settled
    pub fn next_request(&mut self, cell_id: CellId) -> Option<UpdateCellRequest> {
        self.pending.get_mut(&cell_id)?.first_mut()?.unsent.take()
    }

    fn tidy(&mut self, cell_id: CellId) {
        if self.pending.get(&cell_id).is_some_and(Vec::is_empty) {
            self.pending.remove(&cell_id);
        }
    }

    /// Phase two, success: adopt the store's copy unless a newer commit for
    /// the same cell is still outstanding. Older commits are superseded and
    /// their late answers are ignored.
    pub fn confirm(&mut self, cache: &mut TableData, request_id: u64, authoritative: Cell) {
        let cell_id = authoritative.id;
        let Some(queue) = self.pending.get_mut(&cell_id) else {
            tracing::debug!("confirmation for settled request {}", request_id);
            return;
        };
        let Some(index) = queue.iter().position(|p| p.request_id == request_id) else {
            tracing::debug!("confirmation for superseded request {}", request_id);
            return;
        };
        let commit = queue.remove(index);
        queue.retain(|p| p.request_id > request_id);
        match queue.first_mut() {
            Some(next) => next.previous = authoritative.value(commit.column_type),
            None => {
                if !cache.replace_cell(authoritative) {
                    tracing::debug!("confirmed cell {} no longer loaded", cell_id);
                }
            }
        }
        self.tidy(cell_id);
    }

    /// Phase two, failure: restore the pre-edit value. Returns true when the
    /// visible value changed.
    pub fn rollback(&mut self, cache: &mut TableData, cell_id: CellId, request_id: u64) -> bool {
        let Some(queue) = self.pending.get_mut(&cell_id) else {
            return false;
        };
        let Some(index) = queue.iter().position(|p| p.request_id == request_id) else {
            tracing::debug!("failure for superseded request {}", request_id);
            return false;
        };
        let commit = queue.remove(index);
        let newest = index == queue.len();
        if !newest {
            // Hand the fallback down to the commit that replaced this one
            queue[index].previous = commit.previous.clone();
        }
        self.tidy(cell_id);
        if newest {
            tracing::debug!("rolling back cell {} (request {})", cell_id, request_id);
            cache.set_cell_value(cell_id, commit.previous)
        } else {
            false
        }
    }
}
