//! gridlens - Elm-style spreadsheet grid engine
//!
//! This crate provides the interaction core for a virtualized, view-filtered
//! data grid: cell addressing, a selection/edit state machine, row
//! windowing, query composition, optimistic cell sync and batched bulk
//! inserts.

pub mod bulk;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod grid;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod query;
pub mod render;
pub mod runtime;
pub mod store;
pub mod sync;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::GridConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use runtime::Runtime;
pub use store::{GridStore, MemoryStore};
