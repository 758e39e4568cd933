//! Runtime module - command execution
//!
//! - `app` - worker threads performing `Cmd`s and the message loop

pub mod app;

pub use app::{Runtime, WORKER_TIMEOUT};
