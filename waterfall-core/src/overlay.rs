//! Selection/hover highlights, drawn on a transparent layer above the raster.

use crate::color::Color;
use crate::coords::{CoordinateMapper, PlotLayout};
use crate::selection::SelectionState;
use crate::surface::DrawingSurface;
use crate::viewport::ViewportWindow;

const SELECTION_STROKE: Color = Color::opaque([255, 255, 255]);
const HOVER_STROKE: Color = Color::with_alpha([255, 255, 255], 0.45);
const SELECTION_LINE_WIDTH: f64 = 2.0;
const HOVER_LINE_WIDTH: f64 = 1.0;

/// Clear the overlay and draw at most two boxes: the selection (solid) and
/// the hover row (lighter) when it differs from the selection.
pub fn render_overlay<S: DrawingSurface>(
    surface: &mut S,
    layout: PlotLayout,
    window: &ViewportWindow,
    selection: &SelectionState,
) {
    surface.clear();
    let mapper = CoordinateMapper::new(layout, window);
    let h = mapper.row_height();
    if h <= 0.0 {
        return;
    }

    if let Some(y) = mapper.index_to_pixel_top(selection.current()) {
        surface.stroke_rect(
            layout.plot_left(),
            y,
            layout.plot_width(),
            h,
            SELECTION_STROKE,
            SELECTION_LINE_WIDTH,
        );
    }
    if let Some(y) = selection.distinct_hover().and_then(|i| mapper.index_to_pixel_top(i)) {
        surface.stroke_rect(layout.plot_left(), y, layout.plot_width(), h, HOVER_STROKE, HOVER_LINE_WIDTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};

    fn layout() -> PlotLayout {
        PlotLayout { width: 520.0, height: 420.0, ..PlotLayout::default() }
    }

    #[test]
    fn test_selection_and_hover_boxes() {
        let window = ViewportWindow::new(250, 100);
        let mut sel = SelectionState::default();
        sel.set_current(10, 250);
        sel.set_hovered(Some(11));
        let mut s = RecordingSurface::new(520.0, 420.0);
        render_overlay(&mut s, layout(), &window, &sel);
        assert_eq!(s.ops[0], DrawOp::Clear);
        let strokes: Vec<_> = s.stroke_rects().collect();
        assert_eq!(strokes.len(), 2);
        match strokes[0] {
            DrawOp::StrokeRect { y, color, .. } => {
                assert!((y - 50.0).abs() < 1e-9);
                assert_eq!(*color, SELECTION_STROKE);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_hover_on_selection_draws_one_box() {
        let window = ViewportWindow::new(250, 100);
        let mut sel = SelectionState::default();
        sel.set_hovered(Some(0));
        let mut s = RecordingSurface::new(520.0, 420.0);
        render_overlay(&mut s, layout(), &window, &sel);
        assert_eq!(s.stroke_rects().count(), 1);
    }

    #[test]
    fn test_selection_outside_window_is_not_drawn() {
        let mut window = ViewportWindow::new(250, 100);
        window.scroll(crate::viewport::ScrollDirection::Forward, None);
        let sel = SelectionState::default();
        let mut s = RecordingSurface::new(520.0, 420.0);
        render_overlay(&mut s, layout(), &window, &sel);
        assert_eq!(s.stroke_rects().count(), 0);
        assert_eq!(s.ops, vec![DrawOp::Clear]);
    }
}
