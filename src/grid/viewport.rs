//! Row windowing for the virtualized grid
//!
//! Tracks the scroll offset and viewport height over a row set and computes
//! which rows must be materialized, plus `overscan` extra rows on each side.
//! Row heights start at a fixed estimate and are refined as real
//! measurements arrive.

use std::collections::HashMap;
use std::ops::Range;

/// Default rows rendered beyond each edge of the viewport
pub const DEFAULT_OVERSCAN: usize = 5;

/// Default estimated row height in pixels
pub const DEFAULT_ROW_HEIGHT: f64 = 35.0;

/// One row to render, with its vertical placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualRow {
    pub index: usize,
    /// Offset from the top of the scroll content
    pub start: f64,
    pub size: f64,
}

impl VirtualRow {
    pub fn end(&self) -> f64 {
        self.start + self.size
    }
}

/// Result of a window computation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowWindow {
    /// Rows intersecting the viewport
    pub visible: Range<usize>,
    /// Rows to render (visible plus overscan), in order
    pub rows: Vec<VirtualRow>,
    /// Height of the full scroll content
    pub total_height: f64,
}

impl RowWindow {
    pub fn render_range(&self) -> Range<usize> {
        match (self.rows.first(), self.rows.last()) {
            (Some(first), Some(last)) => first.index..last.index + 1,
            _ => 0..0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct RowWindower {
    row_count: usize,
    estimate: f64,
    overscan: usize,
    measured: HashMap<usize, f64>,
    scroll_offset: f64,
    viewport_height: f64,
    /// Prefix sums of row heights; `offsets[i]` is the start of row `i`
    offsets: Vec<f64>,
    offsets_dirty: bool,
}

impl RowWindower {
    pub fn new(estimate: f64, overscan: usize) -> Self {
        Self {
            row_count: 0,
            estimate: if estimate > 0.0 { estimate } else { DEFAULT_ROW_HEIGHT },
            overscan,
            measured: HashMap::new(),
            scroll_offset: 0.0,
            viewport_height: 0.0,
            offsets: vec![0.0],
            offsets_dirty: false,
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Rows that fit in one viewport at the estimated height (at least 1)
    pub fn page_rows(&self) -> usize {
        ((self.viewport_height / self.estimate).floor() as usize).max(1)
    }

    /// Update the total row count, e.g. after a refresh or bulk insert.
    /// Measurements for rows that no longer exist are dropped.
    pub fn set_row_count(&mut self, count: usize) {
        if count == self.row_count {
            return;
        }
        if count < self.row_count {
            self.measured.retain(|&index, _| index < count);
        }
        self.row_count = count;
        self.offsets_dirty = true;
        self.clamp_scroll();
    }

    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = if offset.is_finite() { offset } else { 0.0 };
        self.clamp_scroll();
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.set_scroll_offset(self.scroll_offset + delta);
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        self.clamp_scroll();
    }

    /// Record a measured height for a row. Invalid measurements are ignored.
    pub fn measure(&mut self, index: usize, height: f64) {
        if index >= self.row_count || !height.is_finite() || height <= 0.0 {
            return;
        }
        let previous = self.measured.insert(index, height);
        if previous != Some(height) {
            self.offsets_dirty = true;
        }
    }

    /// Forget all measurements (row identities at each index changed)
    pub fn clear_measurements(&mut self) {
        if !self.measured.is_empty() {
            self.measured.clear();
            self.offsets_dirty = true;
        }
    }

    /// Measured height if known, otherwise the estimate
    pub fn row_height(&self, index: usize) -> f64 {
        self.measured.get(&index).copied().unwrap_or(self.estimate)
    }

    fn ensure_offsets(&mut self) {
        if !self.offsets_dirty && self.offsets.len() == self.row_count + 1 {
            return;
        }
        self.offsets.clear();
        self.offsets.reserve(self.row_count + 1);
        let mut acc = 0.0;
        self.offsets.push(acc);
        for index in 0..self.row_count {
            acc += self.row_height(index);
            self.offsets.push(acc);
        }
        self.offsets_dirty = false;
    }

    /// Height of all rows combined
    pub fn total_height(&mut self) -> f64 {
        self.ensure_offsets();
        self.offsets[self.row_count]
    }

    /// Top offset of a row (clamped to the content end)
    pub fn row_start(&mut self, index: usize) -> f64 {
        self.ensure_offsets();
        self.offsets[index.min(self.row_count)]
    }

    fn clamp_scroll(&mut self) {
        let max = (self.total_height() - self.viewport_height).max(0.0);
        self.scroll_offset = self.scroll_offset.clamp(0.0, max);
    }

    /// Rows intersecting `[scroll_offset, scroll_offset + viewport_height)`
    pub fn visible_range(&mut self) -> Range<usize> {
        self.ensure_offsets();
        if self.row_count == 0 || self.viewport_height <= 0.0 {
            return 0..0;
        }
        let top = self.scroll_offset;
        let bottom = top + self.viewport_height;
        // First row whose end lies below the top edge
        let start = self.offsets[1..].partition_point(|&end| end <= top);
        // First row starting at or after the bottom edge
        let end = self.offsets[..self.row_count].partition_point(|&s| s < bottom);
        start.min(self.row_count)..end.max(start).min(self.row_count)
    }

    /// Compute rows to render with their offsets
    pub fn window(&mut self) -> RowWindow {
        let visible = self.visible_range();
        let total_height = self.total_height();
        if visible.is_empty() {
            return RowWindow {
                visible,
                rows: Vec::new(),
                total_height,
            };
        }
        let render_start = visible.start.saturating_sub(self.overscan);
        let render_end = (visible.end + self.overscan).min(self.row_count);
        let rows = (render_start..render_end)
            .map(|index| VirtualRow {
                index,
                start: self.offsets[index],
                size: self.offsets[index + 1] - self.offsets[index],
            })
            .collect();
        RowWindow {
            visible,
            rows,
            total_height,
        }
    }

    /// Scroll the minimum amount needed to show a whole row
    pub fn scroll_to_row(&mut self, index: usize) {
        if index >= self.row_count {
            return;
        }
        let start = self.row_start(index);
        let end = start + self.row_height(index);
        if start < self.scroll_offset {
            self.scroll_offset = start;
        } else if end > self.scroll_offset + self.viewport_height {
            self.scroll_offset = end - self.viewport_height;
        }
        self.clamp_scroll();
    }
}

impl Default for RowWindower {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_HEIGHT, DEFAULT_OVERSCAN)
    }
}
