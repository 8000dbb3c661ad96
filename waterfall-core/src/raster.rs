//! Spectrogram raster for the current viewport window.

use crate::color::{color_for, generate_gradient, Color, Palette};
use crate::coords::{CoordinateMapper, PlotLayout};
use crate::scale::ColorScale;
use crate::surface::DrawingSurface;
use crate::types::SliceStore;
use crate::viewport::ViewportWindow;

const BACKGROUND: Color = Color::opaque([0, 0, 0]);
const LABEL_COLOR: Color = Color::with_alpha([255, 255, 255], 0.7);
const TICK_COLOR: Color = Color::with_alpha([255, 255, 255], 0.35);

/// 1-2-5 progression of index-label intervals.
const LABEL_INTERVALS: &[usize] = &[1, 2, 5, 10, 20, 50, 100, 200, 500, 1000, 2000, 5000];
/// Minimum vertical spacing between index labels.
const MIN_LABEL_SPACING_PX: f64 = 20.0;

const LEGEND_STEPS: usize = 64;
const LEGEND_BAR_OFFSET: f64 = 8.0;
const LEGEND_BAR_WIDTH: f64 = 14.0;

/// Everything the raster depends on. A change to any of these needs a full
/// repaint; selection and hover do not appear here.
pub struct RasterParams<'a> {
    pub store: &'a SliceStore,
    pub scale: ColorScale,
    pub window: &'a ViewportWindow,
    pub layout: PlotLayout,
    pub palette: Palette,
}

/// Paint the full raster: background, slice rows, index labels, legend.
pub fn render_raster<S: DrawingSurface>(surface: &mut S, params: &RasterParams) {
    let layout = params.layout;
    surface.clear();
    surface.fill_rect(0.0, 0.0, layout.width, layout.height, BACKGROUND);

    let mapper = CoordinateMapper::new(layout, params.window);
    let bins = params.store.bins();
    if mapper.rows() > 0 && bins > 0 {
        draw_rows(surface, params, &mapper, bins);
        draw_index_labels(surface, &layout, params.window, &mapper);
    }
    draw_legend(surface, &layout, params.scale, params.palette);
}

fn draw_rows<S: DrawingSurface>(
    surface: &mut S,
    params: &RasterParams,
    mapper: &CoordinateMapper,
    bins: usize,
) {
    let layout = params.layout;
    let cell_w = layout.plot_width() / bins as f64;
    let row_h = mapper.row_height();
    let x0 = layout.plot_left();

    for index in params.window.start()..params.window.end() {
        // Absent (undecodable) slices stay background.
        let Some(slice) = params.store.get(index) else { continue };
        let Some(y) = mapper.index_to_pixel_top(index) else { continue };

        // Adjacent bins with the same colour are merged into one rect.
        let mut run_start = 0usize;
        let mut run_color: Option<[u8; 3]> = None;
        for (bin, &p) in slice.power.iter().enumerate().take(bins) {
            let rgb = color_for(params.scale.normalize(p as f64), params.palette);
            match run_color {
                Some(c) if c == rgb => {}
                Some(c) => {
                    let w = (bin - run_start) as f64 * cell_w;
                    surface.fill_rect(x0 + run_start as f64 * cell_w, y, w, row_h, Color::opaque(c));
                    run_start = bin;
                    run_color = Some(rgb);
                }
                None => run_color = Some(rgb),
            }
        }
        if let Some(c) = run_color {
            let end = slice.power.len().min(bins);
            let w = (end - run_start) as f64 * cell_w;
            surface.fill_rect(x0 + run_start as f64 * cell_w, y, w, row_h, Color::opaque(c));
        }
    }
}

/// Smallest label interval that keeps labels at least 20 px apart.
pub fn label_interval(row_height: f64) -> usize {
    if row_height <= 0.0 {
        return *LABEL_INTERVALS.last().unwrap_or(&1);
    }
    LABEL_INTERVALS
        .iter()
        .copied()
        .find(|&i| i as f64 * row_height >= MIN_LABEL_SPACING_PX)
        .unwrap_or(*LABEL_INTERVALS.last().unwrap_or(&1))
}

fn draw_index_labels<S: DrawingSurface>(
    surface: &mut S,
    layout: &PlotLayout,
    window: &ViewportWindow,
    mapper: &CoordinateMapper,
) {
    let h = mapper.row_height();
    let interval = label_interval(h);
    let newest = window.end() - 1;

    let mut labelled: Vec<usize> = (window.start()..window.end())
        .filter(|i| i % interval == 0)
        .collect();
    // The newest visible row is always labelled, unless a tick is too close.
    let last_y = mapper.index_to_pixel_top(newest).unwrap_or(0.0);
    let crowded = labelled.last().is_some_and(|&i| {
        mapper
            .index_to_pixel_top(i)
            .is_some_and(|y| (last_y - y).abs() < MIN_LABEL_SPACING_PX && i != newest)
    });
    if crowded {
        labelled.pop();
    }
    if labelled.last() != Some(&newest) {
        labelled.push(newest);
    }

    for index in labelled {
        let Some(top) = mapper.index_to_pixel_top(index) else { continue };
        let center = top + h / 2.0;
        let text = index.to_string();
        let tw = surface.measure(&text);
        surface.fill_rect(layout.plot_left() - 4.0, center, 4.0, 1.0, TICK_COLOR);
        surface.fill_text(&text, (layout.plot_left() - 6.0 - tw).max(0.0), center + 4.0, LABEL_COLOR);
    }
}

/// Colour legend in the right gutter, max power at the top.
fn draw_legend<S: DrawingSurface>(
    surface: &mut S,
    layout: &PlotLayout,
    scale: ColorScale,
    palette: Palette,
) {
    let plot_h = layout.plot_height();
    if plot_h <= 0.0 || layout.right_gutter < LEGEND_BAR_OFFSET + LEGEND_BAR_WIDTH {
        return;
    }
    let x = layout.width - layout.right_gutter + LEGEND_BAR_OFFSET;
    let stops = generate_gradient(palette, LEGEND_STEPS);
    let band_h = plot_h / stops.len() as f64;
    for (i, stop) in stops.iter().enumerate() {
        // Stop 0 at the bottom.
        let y = layout.plot_bottom() - (i + 1) as f64 * band_h;
        // Overlap by a pixel so bands don't leave seams.
        surface.fill_rect(x, y, LEGEND_BAR_WIDTH, band_h + 1.0, Color::opaque(stop.color));
    }

    let text_x = x + LEGEND_BAR_WIDTH + 4.0;
    let mid = (scale.min + scale.max) / 2.0;
    surface.fill_text(&format!("{:.0}", scale.max), text_x, layout.margin_top + 10.0, LABEL_COLOR);
    surface.fill_text(&format!("{:.0}", mid), text_x, layout.margin_top + plot_h / 2.0 + 4.0, LABEL_COLOR);
    surface.fill_text(&format!("{:.0}", scale.min), text_x, layout.plot_bottom(), LABEL_COLOR);
    surface.fill_text("dB", text_x, layout.margin_top + plot_h / 2.0 + 16.0, LABEL_COLOR);
}
