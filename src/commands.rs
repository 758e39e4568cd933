//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! The update functions never talk to the store directly; they return a
//! `Cmd` and the runtime performs it, reporting back with a message.

use std::collections::BTreeSet;

use crate::model::table::{ColumnId, ColumnType, RowId, TableId};
use crate::model::view::ViewId;
use crate::query::QueryDescription;
use crate::sync::UpdateCellRequest;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Load the view's rows and columns.
    /// Sends Msg::App(TableDataLoaded) when done
    FetchTableData { table_id: TableId, view_id: ViewId },
    /// Send an optimistic cell edit to the store.
    /// Sends Msg::Sync(CellUpdated) when done
    UpdateCell(UpdateCellRequest),
    /// Start the search debounce timer.
    /// After delay_ms, sends Msg::Query(SearchSettled)
    DebouncedSearch { revision: u64, delay_ms: u64 },
    /// Persist a composed query on the view, then reload the data.
    /// Sends Msg::Query(Submitted) when done
    SubmitQuery {
        table_id: TableId,
        view_id: ViewId,
        query: QueryDescription,
    },
    /// Insert one bulk batch after delay_ms.
    /// Sends Msg::Bulk(BatchCompleted) when done
    InsertRowBatch {
        table_id: TableId,
        batch: usize,
        rows: usize,
        delay_ms: u64,
    },
    /// Persist the view's hidden columns
    SaveHiddenColumns {
        view_id: ViewId,
        hidden: BTreeSet<ColumnId>,
    },

    // === Table structure ===
    AddRow { table_id: TableId },
    DeleteRow { row_id: RowId },
    AddColumn { table_id: TableId },
    DeleteColumn { column_id: ColumnId },
    UpdateColumn {
        column_id: ColumnId,
        name: Option<String>,
        column_type: Option<ColumnType>,
    },

    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands, dropping no-ops.
    ///
    /// Returns `Cmd::None` when nothing is left and the command itself when
    /// only one remains.
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    pub fn is_none(&self) -> bool {
        match self {
            Cmd::None => true,
            Cmd::Batch(cmds) => cmds.iter().all(Cmd::is_none),
            _ => false,
        }
    }

    /// Whether performing this command talks to the store
    pub fn touches_store(&self) -> bool {
        match self {
            Cmd::None | Cmd::DebouncedSearch { .. } => false,
            Cmd::Batch(cmds) => cmds.iter().any(Cmd::touches_store),
            _ => true,
        }
    }

    /// Flatten nested batches into a list of leaf commands
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }

    /// Convert Option<Cmd> with None to Cmd::None
    pub fn from_option(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }

    /// Convert to `Option`, mapping no-ops to `None`
    pub fn into_option(self) -> Option<Cmd> {
        if self.is_none() {
            None
        } else {
            Some(self)
        }
    }
}

// Allow converting Option<Cmd> to Cmd
impl From<Option<Cmd>> for Cmd {
    fn from(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetch() -> Cmd {
        Cmd::FetchTableData {
            table_id: TableId::new(),
            view_id: ViewId::new(),
        }
    }

    #[test]
    fn test_batch_collapses() {
        assert_eq!(Cmd::batch(vec![]), Cmd::None);
        assert_eq!(Cmd::batch(vec![Cmd::None, Cmd::None]), Cmd::None);

        let single = fetch();
        assert_eq!(Cmd::batch(vec![Cmd::None, single.clone()]), single);

        let cmd = Cmd::batch(vec![fetch(), fetch()]);
        assert!(matches!(cmd, Cmd::Batch(ref cmds) if cmds.len() == 2));
    }

    #[test]
    fn test_flatten_nested_batches() {
        let cmd = Cmd::Batch(vec![
            fetch(),
            Cmd::Batch(vec![
                Cmd::DebouncedSearch {
                    revision: 1,
                    delay_ms: 300,
                },
                Cmd::None,
            ]),
        ]);
        let leaves = cmd.flatten();
        assert_eq!(leaves.len(), 2);
        assert!(matches!(leaves[1], Cmd::DebouncedSearch { revision: 1, .. }));
    }

    #[test]
    fn test_touches_store() {
        assert!(!Cmd::None.touches_store());
        assert!(!Cmd::DebouncedSearch {
            revision: 3,
            delay_ms: 300
        }
        .touches_store());
        assert!(fetch().touches_store());
        assert!(Cmd::Batch(vec![Cmd::None, fetch()]).touches_store());
    }

    #[test]
    fn test_option_conversions() {
        assert_eq!(Cmd::from(None), Cmd::None);
        assert_eq!(Cmd::Batch(vec![Cmd::None]).into_option(), None);
        assert!(fetch().into_option().is_some());
    }
}
