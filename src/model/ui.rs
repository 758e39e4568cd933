//! UI feedback state: blocking errors and transient diagnostics

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a diagnostic stays visible
pub const DIAGNOSTIC_TTL: Duration = Duration::from_secs(5);

/// Diagnostics kept at most; older ones are dropped first
const MAX_DIAGNOSTICS: usize = 8;

/// A non-blocking message shown briefly, like a status bar notice
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub text: String,
    pub expires_at: Instant,
}

impl Diagnostic {
    pub fn new(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            text: text.into(),
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Error the user must acknowledge (not-found / unauthorized)
    pub blocking_error: Option<String>,
    /// Recent non-blocking diagnostics, oldest first
    pub diagnostics: VecDeque<Diagnostic>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_diagnostic(&mut self, text: impl Into<String>) {
        if self.diagnostics.len() == MAX_DIAGNOSTICS {
            self.diagnostics.pop_front();
        }
        self.diagnostics
            .push_back(Diagnostic::new(text, DIAGNOSTIC_TTL));
    }

    pub fn set_blocking(&mut self, text: impl Into<String>) {
        self.blocking_error = Some(text.into());
    }

    pub fn dismiss_blocking(&mut self) {
        self.blocking_error = None;
    }

    /// Drop expired diagnostics; returns true if anything was removed
    pub fn prune_expired(&mut self) -> bool {
        let before = self.diagnostics.len();
        self.diagnostics.retain(|d| !d.is_expired());
        before != self.diagnostics.len()
    }

    pub fn latest_diagnostic(&self) -> Option<&str> {
        self.diagnostics.back().map(|d| d.text.as_str())
    }
}
