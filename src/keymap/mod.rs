//! Keyboard input for the grid
//!
//! ```text
//! "Shift+Tab" → Keystroke → grid_key() → GridKey → Msg::Grid
//! ```
//!
//! Key scripts chain keystrokes with pointer steps so a whole interaction
//! can be replayed from the command line or a test.

mod grid;
mod script;
mod types;

pub use grid::grid_key;
pub use script::parse_script;
pub use types::{KeyCode, Keystroke, Modifiers};
