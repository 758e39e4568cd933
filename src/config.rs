//! Grid configuration persistence
//!
//! Stores tuning knobs in `~/.config/gridlens/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::grid::{DEFAULT_OVERSCAN, DEFAULT_ROW_HEIGHT};
use crate::query::SEARCH_DEBOUNCE_MS;

/// Grid configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Row height used until a row is measured (pixels)
    #[serde(default = "default_row_height_estimate")]
    pub row_height_estimate: f64,
    /// Extra rows rendered above and below the viewport
    #[serde(default = "default_overscan")]
    pub overscan: usize,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Pause between bulk insert batches
    #[serde(default = "default_bulk_batch_delay_ms")]
    pub bulk_batch_delay_ms: u64,
    #[serde(default = "default_bulk_rows_per_batch")]
    pub bulk_rows_per_batch: usize,
    #[serde(default = "default_bulk_total_batches")]
    pub bulk_total_batches: usize,
    /// Initial viewport height (pixels)
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
}

fn default_row_height_estimate() -> f64 {
    DEFAULT_ROW_HEIGHT
}

fn default_overscan() -> usize {
    DEFAULT_OVERSCAN
}

fn default_search_debounce_ms() -> u64 {
    SEARCH_DEBOUNCE_MS
}

fn default_bulk_batch_delay_ms() -> u64 {
    100
}

fn default_bulk_rows_per_batch() -> usize {
    1000
}

fn default_bulk_total_batches() -> usize {
    100
}

fn default_viewport_height() -> f64 {
    600.0
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_height_estimate: default_row_height_estimate(),
            overscan: default_overscan(),
            search_debounce_ms: default_search_debounce_ms(),
            bulk_batch_delay_ms: default_bulk_batch_delay_ms(),
            bulk_rows_per_batch: default_bulk_rows_per_batch(),
            bulk_total_batches: default_bulk_total_batches(),
            viewport_height: default_viewport_height(),
        }
    }
}

impl GridConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load from an explicit path, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<GridConfig>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.sanitized()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Replace out-of-range values with usable ones
    pub fn sanitized(mut self) -> Self {
        if !self.row_height_estimate.is_finite() || self.row_height_estimate <= 0.0 {
            tracing::warn!(
                "row_height_estimate {} out of range, using {}",
                self.row_height_estimate,
                DEFAULT_ROW_HEIGHT
            );
            self.row_height_estimate = DEFAULT_ROW_HEIGHT;
        }
        if !self.viewport_height.is_finite() || self.viewport_height < 0.0 {
            self.viewport_height = default_viewport_height();
        }
        self.bulk_total_batches = self.bulk_total_batches.max(1);
        self.bulk_rows_per_batch = self.bulk_rows_per_batch.max(1);
        self
    }
}
