//! Selection/edit state machine
//!
//! The grid cursor is one of three states. [`transition`] is a pure function
//! from (state, event, loaded data) to (new state, optional commit), so the
//! whole table of behaviors can be tested without any rendering surface.
//!
//! ```text
//!            click c                 F2 / Enter / click c again / char
//!   Idle ─────────────▶ Selected(c) ─────────────────────────────▶ Editing(c, draft)
//!    ▲                   │  ▲   │ arrows/Tab: Selected(c')          │
//!    │ Delete/Backspace  │  │   │                                   │
//!    │ (commit "")       │  └───┴──── Enter/Tab/blur (commit) ──────┤
//!    └───────────────────┘            Escape (discard) ─────────────┘
//!   any state ── click outside ──▶ Idle
//! ```

use crate::model::table::CellId;

use super::address::{CellPosition, GridLookup};
use super::navigation::{self, NavMove};

/// The focused cell and where it currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveCell {
    pub cell_id: CellId,
    pub position: CellPosition,
}

impl ActiveCell {
    pub fn row_index(&self) -> usize {
        self.position.row
    }

    pub fn column_index(&self) -> usize {
        self.position.col
    }
}

/// Grid cursor state. Editing carries its cell, so the editing cell is
/// always the active cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CursorState {
    #[default]
    Idle,
    Selected(ActiveCell),
    Editing { cell: ActiveCell, draft: String },
}

impl CursorState {
    pub fn active_cell(&self) -> Option<&ActiveCell> {
        match self {
            CursorState::Idle => None,
            CursorState::Selected(cell) | CursorState::Editing { cell, .. } => Some(cell),
        }
    }

    pub fn editing_cell(&self) -> Option<&ActiveCell> {
        match self {
            CursorState::Editing { cell, .. } => Some(cell),
            _ => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, CursorState::Editing { .. })
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            CursorState::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            CursorState::Idle => "idle",
            CursorState::Selected(_) => "selected",
            CursorState::Editing { .. } => "editing",
        }
    }
}

/// Keys the grid reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridKey {
    Navigate(NavMove),
    Enter,
    Tab,
    ShiftTab,
    F2,
    Escape,
    Delete,
    Backspace,
    /// A printable character typed without Ctrl/Alt/Meta
    Char(char),
}

/// Input to the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum CursorEvent {
    /// Pointer click on a grid cell
    Click(CellPosition),
    /// Pointer click outside the grid's bounds
    ClickOutside,
    /// The edit input lost focus without a click elsewhere in the grid
    Blur,
    Key(GridKey),
    /// The edit input's text was replaced (e.g. paste or IME)
    SetDraft(String),
}

/// A value write requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRequest {
    pub cell_id: CellId,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: CursorState,
    pub commit: Option<CommitRequest>,
}

impl Transition {
    fn to(state: CursorState) -> Self {
        Self {
            state,
            commit: None,
        }
    }

    fn committing(state: CursorState, cell_id: CellId, value: String) -> Self {
        Self {
            state,
            commit: Some(CommitRequest { cell_id, value }),
        }
    }
}

fn activate(grid: &GridLookup, position: CellPosition) -> Option<ActiveCell> {
    grid.address
        .resolve(position.row, position.col)
        .map(|cell_id| ActiveCell { cell_id, position })
}

fn start_editing(cell: ActiveCell, draft: String) -> CursorState {
    CursorState::Editing { cell, draft }
}

/// Compute the next state for an event
pub fn transition(state: &CursorState, event: CursorEvent, grid: &GridLookup) -> Transition {
    match state {
        CursorState::Idle => match event {
            CursorEvent::Click(position) => match activate(grid, position) {
                Some(cell) => Transition::to(CursorState::Selected(cell)),
                None => Transition::to(CursorState::Idle),
            },
            _ => Transition::to(CursorState::Idle),
        },

        CursorState::Selected(cell) => {
            let cell = *cell;
            match event {
                CursorEvent::Click(position) if position == cell.position => {
                    Transition::to(start_editing(cell, grid.display_value(cell.cell_id)))
                }
                CursorEvent::Click(position) => match activate(grid, position) {
                    Some(next) => Transition::to(CursorState::Selected(next)),
                    None => Transition::to(CursorState::Selected(cell)),
                },
                CursorEvent::ClickOutside | CursorEvent::Blur => Transition::to(CursorState::Idle),
                CursorEvent::Key(key) => selected_key(cell, key, grid),
                CursorEvent::SetDraft(_) => Transition::to(CursorState::Selected(cell)),
            }
        }

        CursorState::Editing { cell, draft } => {
            let cell = *cell;
            match event {
                CursorEvent::Click(position) if position == cell.position => {
                    Transition::to(state.clone())
                }
                CursorEvent::Click(position) => {
                    let next = activate(grid, position).unwrap_or(cell);
                    Transition::committing(CursorState::Selected(next), cell.cell_id, draft.clone())
                }
                CursorEvent::ClickOutside => {
                    Transition::committing(CursorState::Idle, cell.cell_id, draft.clone())
                }
                CursorEvent::Blur => Transition::committing(
                    CursorState::Selected(cell),
                    cell.cell_id,
                    draft.clone(),
                ),
                CursorEvent::Key(key) => editing_key(cell, draft, key),
                CursorEvent::SetDraft(text) => Transition::to(start_editing(cell, text)),
            }
        }
    }
}

fn selected_key(cell: ActiveCell, key: GridKey, grid: &GridLookup) -> Transition {
    let move_to = |mv: NavMove| {
        let next = navigation::target(cell.position, mv, grid.address, grid.page_rows)
            .and_then(|p| activate(grid, p))
            .unwrap_or(cell);
        Transition::to(CursorState::Selected(next))
    };

    match key {
        GridKey::Navigate(mv) => move_to(mv),
        GridKey::Tab => move_to(NavMove::NextCell),
        GridKey::ShiftTab => move_to(NavMove::PrevCell),
        GridKey::F2 | GridKey::Enter => {
            Transition::to(start_editing(cell, grid.display_value(cell.cell_id)))
        }
        GridKey::Char(ch) => Transition::to(start_editing(cell, ch.to_string())),
        GridKey::Delete | GridKey::Backspace => {
            Transition::committing(CursorState::Idle, cell.cell_id, String::new())
        }
        GridKey::Escape => Transition::to(CursorState::Selected(cell)),
    }
}

fn editing_key(cell: ActiveCell, draft: &str, key: GridKey) -> Transition {
    match key {
        GridKey::Enter | GridKey::Tab | GridKey::ShiftTab => {
            Transition::committing(CursorState::Selected(cell), cell.cell_id, draft.to_string())
        }
        GridKey::Escape => Transition::to(CursorState::Selected(cell)),
        GridKey::Char(ch) => {
            let mut next = draft.to_string();
            next.push(ch);
            Transition::to(start_editing(cell, next))
        }
        GridKey::Backspace => {
            let mut next = draft.to_string();
            next.pop();
            Transition::to(start_editing(cell, next))
        }
        // Navigation, F2 and forward-delete (caret is at the end) do nothing
        GridKey::Navigate(_) | GridKey::F2 | GridKey::Delete => {
            Transition::to(start_editing(cell, draft.to_string()))
        }
    }
}

/// Re-anchor the cursor after the grid was rebuilt (refresh, re-sort,
/// column hidden). A cell that is no longer materialized resets to idle.
pub fn reconcile(state: &CursorState, grid: &GridLookup) -> CursorState {
    let relocate = |cell: &ActiveCell| {
        grid.address.locate(cell.cell_id).map(|position| ActiveCell {
            cell_id: cell.cell_id,
            position,
        })
    };
    match state {
        CursorState::Idle => CursorState::Idle,
        CursorState::Selected(cell) => relocate(cell)
            .map(CursorState::Selected)
            .unwrap_or(CursorState::Idle),
        CursorState::Editing { cell, draft } => relocate(cell)
            .map(|cell| CursorState::Editing {
                cell,
                draft: draft.clone(),
            })
            .unwrap_or(CursorState::Idle),
    }
}
