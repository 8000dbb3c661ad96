use std::cell::Cell;
use std::rc::Rc;

use waterfall_core::api::parse_slices;
use waterfall_core::config::EngineConfig;
use waterfall_core::decode::{decode_slices, encode_power};
use waterfall_core::periodogram::{ChartPoint, ChartSink};
use waterfall_core::playback::TimerHandle;
use waterfall_core::surface::{DrawOp, RecordingSurface};
use waterfall_core::types::{RawSlice, Slice, SliceStore};
use waterfall_core::{Action, Redraw, WaterfallEngine};

struct CountingTimer(Rc<Cell<usize>>);

impl TimerHandle for CountingTimer {
    fn cancel(self) {
        self.0.set(self.0.get() + 1);
    }
}

#[derive(Default)]
struct LastTrace {
    index: Option<usize>,
    points: Vec<ChartPoint>,
}

impl ChartSink for LastTrace {
    fn show(&mut self, index: Option<usize>, points: &[ChartPoint]) {
        self.index = index;
        self.points = points.to_vec();
    }
}

fn uniform_store(n: usize, bins: usize) -> SliceStore {
    SliceStore::new(
        (0..n)
            .map(|i| Some(Slice { sample_rate: 2_000_000.0, power: vec![-70.0 + (i % 7) as f32; bins] }))
            .collect(),
    )
}

fn engine_with(store: SliceStore) -> WaterfallEngine<CountingTimer> {
    let mut engine = WaterfallEngine::new(&EngineConfig::default());
    engine.apply(Action::Resize { width: 820.0, height: 520.0 });
    engine.apply(Action::Load(store));
    engine
}

#[test]
fn test_click_bottom_row_selects_newest_visible() {
    let mut engine = engine_with(uniform_store(250, 32));
    assert_eq!(engine.selection().current(), 0);
    assert_eq!(engine.window().start(), 0);

    let plot_bottom = engine.layout().plot_bottom();
    let redraw = engine.apply(Action::Click { y: plot_bottom - 1.0 });
    assert_eq!(engine.selection().current(), 99);
    assert_eq!(redraw, Redraw::SELECTION);
}

#[test]
fn test_click_and_hover_agree() {
    let mut engine = engine_with(uniform_store(250, 32));
    for y in [15.0, 123.4, 260.0, 480.2, 509.9] {
        engine.apply(Action::Hover { y });
        let hovered = engine.selection().hovered();
        engine.apply(Action::Click { y });
        assert_eq!(hovered, Some(engine.selection().current()));
    }
}

#[test]
fn test_corrupt_slice_skipped_rest_render() {
    let raw: Vec<RawSlice> = (0..10)
        .map(|i| {
            let data = if i == 5 { "!!not base64!!".to_string() } else { encode_power(&[-80.0, -20.0, -50.0]) };
            RawSlice::new(data, 1000.0)
        })
        .collect();
    let store = decode_slices(&raw);
    assert_eq!(store.valid_count(), 9);

    let mut engine = engine_with(store);
    let mut surface = RecordingSurface::new(820.0, 520.0);
    engine.render_raster(&mut surface);

    let plot_left = engine.layout().plot_left();
    let plot_right = plot_left + engine.layout().plot_width();
    let mut row_tops: Vec<i64> = surface
        .fill_rects()
        .filter_map(|op| match op {
            DrawOp::FillRect { x, y, w, .. } if *x >= plot_left && *x < plot_right && *w < 820.0 => {
                Some((*y * 1000.0).round() as i64)
            }
            _ => None,
        })
        .collect();
    row_tops.sort_unstable();
    row_tops.dedup();
    assert_eq!(row_tops.len(), 9);

    let scale = engine.scale();
    assert!((scale.min - -83.0).abs() < 1e-9);
    assert!((scale.max - -17.0).abs() < 1e-9);

    let mut chart = LastTrace::default();
    engine.apply(Action::SelectIndex(5));
    engine.render_periodogram(&mut chart);
    assert_eq!(chart.index, Some(5));
    assert!(chart.points.is_empty());
}

#[test]
fn test_empty_capture_uses_defaults() {
    let raw = parse_slices("[]").unwrap();
    let engine = engine_with(decode_slices(&raw));
    let scale = engine.scale();
    assert_eq!((scale.min, scale.max), (-130.0, 0.0));
    let slider = engine.slider_state();
    assert_eq!(slider.counter, "0 / 0");
    assert!(!slider.enabled);
}

#[test]
fn test_playback_from_second_to_last() {
    let cancelled = Rc::new(Cell::new(0));
    let mut engine = engine_with(uniform_store(250, 8));
    engine.apply(Action::SelectIndex(248));

    let spawned = Rc::new(Cell::new(0));
    let (s, c) = (spawned.clone(), cancelled.clone());
    assert!(engine.start_playback(move |_| {
        s.set(s.get() + 1);
        CountingTimer(c)
    }));

    let mut ticks = 0;
    while engine.is_playing() {
        engine.apply(Action::PlaybackTick);
        ticks += 1;
        assert!(ticks < 10, "playback never stopped");
    }
    assert_eq!(engine.selection().current(), 249);
    assert_eq!(spawned.get(), 1);
    assert_eq!(cancelled.get(), 1);
}

#[test]
fn test_periodogram_tracks_selection() {
    let mut engine = engine_with(uniform_store(20, 4));
    let mut chart = LastTrace::default();
    assert!(engine.render_periodogram(&mut chart));
    assert_eq!(chart.index, Some(0));
    assert_eq!(chart.points.len(), 4);
    assert_eq!(chart.points[0].x, -1_000_000.0);

    engine.apply(Action::Step(1));
    assert!(engine.render_periodogram(&mut chart));
    assert_eq!(chart.index, Some(1));
    assert!(!engine.render_periodogram(&mut chart));
}

#[test]
fn test_overlay_redraw_does_not_touch_raster() {
    let mut engine = engine_with(uniform_store(250, 8));
    let mut overlay = RecordingSurface::new(820.0, 520.0);
    let redraw = engine.apply(Action::Hover { y: 200.0 });
    assert!(!redraw.raster);
    engine.render_overlay(&mut overlay);
    assert_eq!(overlay.ops.first(), Some(&DrawOp::Clear));
    assert_eq!(overlay.stroke_rects().count(), 2);
}
