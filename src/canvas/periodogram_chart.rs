//! Line chart of the selected slice's power spectrum.

use waterfall_core::periodogram::{chart_title, slice_number, ChartPoint, ChartSink};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::canvas::surface::{get_canvas_ctx, sync_canvas_size};

const LABEL_AREA_WIDTH: f64 = 52.0;
const AXIS_HEIGHT: f64 = 20.0;
const TITLE_HEIGHT: f64 = 20.0;
const RIGHT_PAD: f64 = 12.0;

/// Step from the 1-2-5 progression giving roughly `target` intervals.
pub fn nice_step(range: f64, target: usize) -> f64 {
    if !(range > 0.0) || target == 0 {
        return 1.0;
    }
    let raw = range / target as f64;
    let mag = 10f64.powi(raw.log10().floor() as i32);
    let norm = raw / mag;
    let step = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    step * mag
}

/// Compact frequency label: Hz, kHz or MHz.
pub fn format_freq(hz: f64) -> String {
    let abs = hz.abs();
    if abs >= 1_000_000.0 {
        let mhz = hz / 1_000_000.0;
        if (mhz - mhz.round()).abs() < 1e-9 {
            format!("{:.0} MHz", mhz)
        } else {
            format!("{:.2} MHz", mhz)
        }
    } else if abs >= 1_000.0 {
        format!("{:.0} kHz", hz / 1_000.0)
    } else {
        format!("{:.0} Hz", hz)
    }
}

pub struct PeriodogramChart {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl PeriodogramChart {
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let (w, h) = sync_canvas_size(canvas)?;
        let ctx = get_canvas_ctx(canvas)?;
        Some(Self { ctx, width: w as f64, height: h as f64 })
    }

    fn message(&self, text: &str) {
        self.ctx.set_fill_style_str("rgba(255,255,255,0.5)");
        self.ctx.set_font("12px sans-serif");
        let _ = self.ctx.fill_text(text, LABEL_AREA_WIDTH, self.height / 2.0);
    }
}

impl ChartSink for PeriodogramChart {
    fn show(&mut self, index: Option<usize>, points: &[ChartPoint]) {
        let ctx = &self.ctx;
        let (cw, ch) = (self.width, self.height);

        ctx.set_fill_style_str("#0a0a0a");
        ctx.fill_rect(0.0, 0.0, cw, ch);

        ctx.set_fill_style_str("rgba(255,255,255,0.8)");
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&chart_title(index), LABEL_AREA_WIDTH, 14.0);

        let Some(index) = index else {
            self.message("No slice selected");
            return;
        };
        let finite: Vec<&ChartPoint> = points.iter().filter(|p| p.y.is_finite()).collect();
        if finite.is_empty() {
            self.message(&format!("No data for slice {}", slice_number(index)));
            return;
        }

        let x_min = finite.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let x_max = finite.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let mut y_min = finite.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let mut y_max = finite.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        if y_max - y_min < 1e-9 {
            y_min -= 1.0;
            y_max += 1.0;
        }
        let pad = (y_max - y_min) * 0.05;
        y_min -= pad;
        y_max += pad;
        let x_range = (x_max - x_min).max(1e-9);
        let y_range = y_max - y_min;

        let plot_x = LABEL_AREA_WIDTH;
        let plot_y = TITLE_HEIGHT;
        let plot_w = (cw - LABEL_AREA_WIDTH - RIGHT_PAD).max(1.0);
        let plot_h = (ch - TITLE_HEIGHT - AXIS_HEIGHT).max(1.0);
        let to_x = |x: f64| plot_x + (x - x_min) / x_range * plot_w;
        let to_y = |y: f64| plot_y + (1.0 - (y - y_min) / y_range) * plot_h;

        // Grid + labels
        ctx.set_font("10px sans-serif");
        ctx.set_line_width(1.0);
        let y_step = nice_step(y_range, 5);
        let mut y = (y_min / y_step).ceil() * y_step;
        while y <= y_max {
            let py = to_y(y);
            ctx.set_stroke_style_str("#222");
            ctx.begin_path();
            ctx.move_to(plot_x, py);
            ctx.line_to(plot_x + plot_w, py);
            ctx.stroke();
            ctx.set_fill_style_str("rgba(255,255,255,0.6)");
            let _ = ctx.fill_text(&format!("{:.0} dB", y), 4.0, py + 3.0);
            y += y_step;
        }
        let x_step = nice_step(x_range, 6);
        let mut x = (x_min / x_step).ceil() * x_step;
        while x <= x_max {
            let px = to_x(x);
            ctx.set_stroke_style_str("#222");
            ctx.begin_path();
            ctx.move_to(px, plot_y);
            ctx.line_to(px, plot_y + plot_h);
            ctx.stroke();
            ctx.set_fill_style_str("rgba(255,255,255,0.6)");
            let label = format_freq(x);
            let tw = ctx.measure_text(&label).map(|m| m.width()).unwrap_or(0.0);
            let _ = ctx.fill_text(&label, px - tw / 2.0, ch - 6.0);
            x += x_step;
        }

        // Trace
        ctx.set_stroke_style_str("#4fc3f7");
        ctx.set_line_width(1.0);
        ctx.begin_path();
        for (i, p) in finite.iter().enumerate() {
            let (px, py) = (to_x(p.x), to_y(p.y));
            if i == 0 {
                ctx.move_to(px, py);
            } else {
                ctx.line_to(px, py);
            }
        }
        ctx.stroke();
    }
}
