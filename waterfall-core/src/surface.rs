//! Drawing-surface abstraction so renderers can run without a real canvas.

use crate::color::Color;

/// The subset of a 2D canvas the renderers need.
pub trait DrawingSurface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Clear the whole surface to transparent.
    fn clear(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color);

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, line_width: f64);

    /// Draw text with its left edge at `x` and baseline at `y`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color);

    /// Rendered width of `text` in pixels.
    fn measure(&self, text: &str) -> f64;
}

/// A recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    FillRect { x: f64, y: f64, w: f64, h: f64, color: Color },
    StrokeRect { x: f64, y: f64, w: f64, h: f64, color: Color, line_width: f64 },
    Text { text: String, x: f64, y: f64, color: Color },
}

/// Surface that records every call. Text is measured at a fixed 6 px/char.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, ops: Vec::new() }
    }

    pub fn fill_rects(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::FillRect { .. }))
    }

    pub fn stroke_rects(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::StrokeRect { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.ops.push(DrawOp::FillRect { x, y, w, h, color });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, line_width: f64) {
        self.ops.push(DrawOp::StrokeRect { x, y, w, h, color, line_width });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color) {
        self.ops.push(DrawOp::Text { text: text.to_string(), x, y, color });
    }

    fn measure(&self, text: &str) -> f64 {
        text.chars().count() as f64 * 6.0
    }
}
