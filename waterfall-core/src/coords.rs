//! Pixel ↔ slice-index mapping shared by click and hover handling.
//!
//! Rows are counted up from the bottom of the plot: row 0 sits just above
//! the bottom margin and holds the newest visible slice (`start + R - 1`);
//! the oldest visible slice (`start`) is the top row.

use serde::Deserialize;

use crate::viewport::ViewportWindow;

/// Canvas geometry: overall size plus reserved margins and gutters (px).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotLayout {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    /// Index labels.
    pub left_gutter: f64,
    /// Colour legend.
    pub right_gutter: f64,
}

impl Default for PlotLayout {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            margin_top: 10.0,
            margin_bottom: 10.0,
            left_gutter: 50.0,
            right_gutter: 70.0,
        }
    }
}

impl PlotLayout {
    pub fn plot_left(&self) -> f64 {
        self.left_gutter
    }

    pub fn plot_width(&self) -> f64 {
        (self.width - self.left_gutter - self.right_gutter).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - self.margin_top - self.margin_bottom).max(0.0)
    }

    /// Bottom edge of the plot area, in canvas pixels.
    pub fn plot_bottom(&self) -> f64 {
        self.height - self.margin_bottom
    }

    pub fn resized(self, width: f64, height: f64) -> Self {
        Self { width, height, ..self }
    }
}

/// Maps between canvas y and slice index for one viewport position.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateMapper {
    layout: PlotLayout,
    start: usize,
    rows: usize,
}

impl CoordinateMapper {
    pub fn new(layout: PlotLayout, window: &ViewportWindow) -> Self {
        Self { layout, start: window.start(), rows: window.visible_rows() }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Height of one slice row in pixels. Zero when nothing is visible.
    pub fn row_height(&self) -> f64 {
        if self.rows == 0 {
            return 0.0;
        }
        self.layout.plot_height() / self.rows as f64
    }

    /// Slice under canvas y, or `None` outside the plot's vertical extent.
    pub fn pixel_to_index(&self, y: f64) -> Option<usize> {
        let h = self.row_height();
        if h <= 0.0 || !y.is_finite() {
            return None;
        }
        if y < self.layout.margin_top || y > self.layout.plot_bottom() {
            return None;
        }
        let row = (((self.layout.plot_bottom() - y) / h).floor() as usize).min(self.rows - 1);
        Some(self.start + (self.rows - 1 - row))
    }

    /// Canvas y of the top edge of `index`'s row, if it is visible.
    pub fn index_to_pixel_top(&self, index: usize) -> Option<f64> {
        let offset = index.checked_sub(self.start)?;
        if offset >= self.rows {
            return None;
        }
        let h = self.row_height();
        // Row counted from the bottom is rows-1-offset; its top edge sits one
        // row above its bottom edge.
        let row = (self.rows - 1 - offset) as f64;
        Some(self.layout.plot_bottom() - (row + 1.0) * h)
    }
}
