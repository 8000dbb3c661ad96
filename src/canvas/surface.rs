use wasm_bindgen::JsCast;
use waterfall_core::color::Color;
use waterfall_core::surface::DrawingSurface;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const FONT: &str = "11px sans-serif";

pub fn get_canvas_ctx(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()?
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Match the canvas backing store to its laid-out size. Returns the size,
/// or `None` while the element has no layout yet.
pub fn sync_canvas_size(canvas: &HtmlCanvasElement) -> Option<(u32, u32)> {
    let rect = canvas.get_bounding_client_rect();
    let display_w = rect.width() as u32;
    let display_h = rect.height() as u32;
    if display_w == 0 || display_h == 0 {
        return None;
    }
    if canvas.width() != display_w || canvas.height() != display_h {
        canvas.set_width(display_w);
        canvas.set_height(display_h);
    }
    Some((display_w, display_h))
}

/// [`DrawingSurface`] over a 2D canvas context.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    /// Last fill style set; raster rows reuse colours heavily.
    fill_style: String,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = get_canvas_ctx(canvas)?;
        ctx.set_font(FONT);
        Some(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            fill_style: String::new(),
        })
    }

    fn set_fill(&mut self, color: Color) {
        let css = color.css();
        if css != self.fill_style {
            self.ctx.set_fill_style_str(&css);
            self.fill_style = css;
        }
    }
}

impl DrawingSurface for CanvasSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.set_fill(color);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, line_width: f64) {
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(line_width);
        self.ctx.stroke_rect(x, y, w, h);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color) {
        self.set_fill(color);
        let _ = self.ctx.fill_text(text, x, y);
    }

    fn measure(&self, text: &str) -> f64 {
        self.ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
    }
}
