//! Debounced free-text search input
//!
//! Every keystroke bumps a revision and schedules a settle after the
//! debounce delay. A settle carrying an old revision is stale and dropped;
//! a settle whose text equals the last submitted text is a no-op.

/// Default settle delay for the search box
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone)]
pub struct SearchBox {
    input: String,
    revision: u64,
    submitted: String,
    debounce_ms: u64,
}

impl SearchBox {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            input: String::new(),
            revision: 0,
            submitted: String::new(),
            debounce_ms,
        }
    }

    /// Text currently typed in the box
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Last settled text that was handed to the composer
    pub fn submitted(&self) -> &str {
        &self.submitted
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn debounce_ms(&self) -> u64 {
        self.debounce_ms
    }

    /// Record a keystroke; returns the revision the settle must carry
    pub fn set_input(&mut self, text: impl Into<String>) -> u64 {
        self.input = text.into();
        self.revision = self.revision.wrapping_add(1);
        self.revision
    }

    /// Handle a debounce timer firing.
    ///
    /// Returns the text to submit, or `None` when the timer is stale or the
    /// text matches what was last submitted.
    pub fn settle(&mut self, revision: u64) -> Option<String> {
        if revision != self.revision {
            tracing::debug!(
                "Skipping stale search settle: revision {} != current {}",
                revision,
                self.revision
            );
            return None;
        }
        if self.input == self.submitted {
            tracing::debug!("search settled on unchanged text, not resubmitting");
            return None;
        }
        self.submitted = self.input.clone();
        Some(self.submitted.clone())
    }

    /// Forget a submission the store did not accept so the same text can
    /// settle again; the typed input is kept
    pub fn revert_submitted(&mut self, text: &str) {
        self.submitted = text.to_string();
    }

    /// Adopt a view's stored search text without submitting
    pub fn reset(&mut self, text: &str) {
        self.input = text.to_string();
        self.submitted = text.to_string();
        self.revision = self.revision.wrapping_add(1);
    }
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE_MS)
    }
}
