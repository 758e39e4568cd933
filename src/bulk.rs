//! Chunked row insertion
//!
//! Batches run strictly one after another: the next batch is only scheduled
//! once the previous one has reported back. A failed batch aborts the run and
//! leaves earlier batches in place. A run that finishes asks for exactly one
//! data refresh.

use std::fmt;

/// Batch counter shown while a run is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BulkProgress {
    pub current_batch: usize,
    pub total_batches: usize,
}

impl BulkProgress {
    pub fn fraction(&self) -> f64 {
        if self.total_batches == 0 {
            0.0
        } else {
            self.current_batch as f64 / self.total_batches as f64
        }
    }
}

impl fmt::Display for BulkProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "batch {}/{}", self.current_batch, self.total_batches)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum BulkState {
    #[default]
    Idle,
    Running {
        progress: BulkProgress,
        rows_per_batch: usize,
    },
    Completed {
        batches: usize,
        rows: usize,
    },
    Failed {
        progress: BulkProgress,
        rows_inserted: usize,
        error: String,
    },
}

/// Next thing the caller should do for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkStep {
    /// Insert batch `batch` (1-based) of `rows` rows after `delay_ms`
    Insert {
        batch: usize,
        rows: usize,
        delay_ms: u64,
    },
    /// All batches done; reload table data once
    Refresh,
    /// Aborted; nothing more to do
    Stop,
}

#[derive(Debug, Clone, Default)]
pub struct BulkInserter {
    state: BulkState,
    batch_delay_ms: u64,
    rows_inserted: usize,
}

impl BulkInserter {
    pub fn new(batch_delay_ms: u64) -> Self {
        Self {
            state: BulkState::Idle,
            batch_delay_ms,
            rows_inserted: 0,
        }
    }

    pub fn state(&self) -> &BulkState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, BulkState::Running { .. })
    }

    pub fn progress(&self) -> Option<BulkProgress> {
        match &self.state {
            BulkState::Running { progress, .. } | BulkState::Failed { progress, .. } => {
                Some(*progress)
            }
            BulkState::Completed { batches, .. } => Some(BulkProgress {
                current_batch: *batches,
                total_batches: *batches,
            }),
            BulkState::Idle => None,
        }
    }

    pub fn rows_inserted(&self) -> usize {
        self.rows_inserted
    }

    /// Begin a run. Returns `None` while another run is active or when
    /// there is nothing to insert.
    pub fn start(&mut self, total_batches: usize, rows_per_batch: usize) -> Option<BulkStep> {
        if self.is_running() {
            tracing::warn!("bulk insert already running, ignoring start");
            return None;
        }
        if total_batches == 0 || rows_per_batch == 0 {
            tracing::debug!("bulk insert with no rows requested");
            return None;
        }
        tracing::info!(
            "bulk insert: {} batches of {} rows",
            total_batches,
            rows_per_batch
        );
        self.rows_inserted = 0;
        self.state = BulkState::Running {
            progress: BulkProgress {
                current_batch: 1,
                total_batches,
            },
            rows_per_batch,
        };
        Some(BulkStep::Insert {
            batch: 1,
            rows: rows_per_batch,
            delay_ms: 0,
        })
    }

    /// Record a finished batch and decide what follows
    pub fn batch_succeeded(&mut self, batch: usize, rows: usize) -> BulkStep {
        let BulkState::Running {
            progress,
            rows_per_batch,
        } = self.state.clone()
        else {
            tracing::debug!("batch {} reported with no active run", batch);
            return BulkStep::Stop;
        };
        if batch != progress.current_batch {
            tracing::warn!(
                "out-of-order batch {} (expected {})",
                batch,
                progress.current_batch
            );
            return BulkStep::Stop;
        }

        self.rows_inserted += rows;
        if batch >= progress.total_batches {
            tracing::info!(
                "bulk insert complete: {} rows in {} batches",
                self.rows_inserted,
                progress.total_batches
            );
            self.state = BulkState::Completed {
                batches: progress.total_batches,
                rows: self.rows_inserted,
            };
            return BulkStep::Refresh;
        }

        let next = batch + 1;
        self.state = BulkState::Running {
            progress: BulkProgress {
                current_batch: next,
                total_batches: progress.total_batches,
            },
            rows_per_batch,
        };
        BulkStep::Insert {
            batch: next,
            rows: rows_per_batch,
            delay_ms: self.batch_delay_ms,
        }
    }

    /// Abort the run; completed batches stay
    pub fn batch_failed(&mut self, batch: usize, error: impl Into<String>) -> BulkStep {
        let BulkState::Running { progress, .. } = self.state.clone() else {
            return BulkStep::Stop;
        };
        let error = error.into();
        tracing::error!(
            "bulk insert aborted at batch {}/{}: {}",
            batch,
            progress.total_batches,
            error
        );
        self.state = BulkState::Failed {
            progress,
            rows_inserted: self.rows_inserted,
            error,
        };
        BulkStep::Stop
    }
}
