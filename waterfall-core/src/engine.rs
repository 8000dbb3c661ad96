//! The waterfall engine: sole owner of slices, scale, window, selection and
//! playback. Every input becomes an [`Action`]; [`WaterfallEngine::apply`]
//! reports which layers need repainting so the host performs exactly one
//! repaint per mutation.

use crate::color::Palette;
use crate::config::EngineConfig;
use crate::coords::{CoordinateMapper, PlotLayout};
use crate::overlay::render_overlay;
use crate::periodogram::{slice_number, ChartSink, PeriodogramView};
use crate::playback::{PlaybackScheduler, TickOutcome, TimerHandle};
use crate::raster::{render_raster, RasterParams};
use crate::scale::ColorScale;
use crate::selection::SelectionState;
use crate::surface::DrawingSurface;
use crate::types::SliceStore;
use crate::viewport::{ScrollDirection, ViewportWindow};

/// Layers to repaint after an action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Redraw {
    pub raster: bool,
    pub overlay: bool,
    pub periodogram: bool,
}

impl Redraw {
    pub const NONE: Redraw = Redraw { raster: false, overlay: false, periodogram: false };
    pub const ALL: Redraw = Redraw { raster: true, overlay: true, periodogram: true };
    /// Hover only.
    pub const OVERLAY: Redraw = Redraw { raster: false, overlay: true, periodogram: false };
    /// Selection moved within the current window.
    pub const SELECTION: Redraw = Redraw { raster: false, overlay: true, periodogram: true };
    /// Window or look changed. Overlay boxes move with the rows.
    pub const VIEW: Redraw = Redraw { raster: true, overlay: true, periodogram: false };

    pub fn merge(self, other: Redraw) -> Redraw {
        Redraw {
            raster: self.raster || other.raster,
            overlay: self.overlay || other.overlay,
            periodogram: self.periodogram || other.periodogram,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Redraw::NONE
    }
}

#[derive(Clone, Debug)]
pub enum Action {
    /// Replace the capture. Recomputes the colour scale.
    Load(SliceStore),
    /// Slider or direct index entry.
    SelectIndex(usize),
    /// Stepper buttons and arrow keys.
    Step(i64),
    /// Scroll buttons and PageUp/PageDown. Leaves the selection alone.
    Scroll(ScrollDirection),
    Click { y: f64 },
    Hover { y: f64 },
    Leave,
    SetPalette(Palette),
    SetFftSize(u32),
    Resize { width: f64, height: f64 },
    PlaybackTick,
}

/// Slider position and counter text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SliderState {
    pub min: usize,
    pub max: usize,
    pub value: usize,
    pub counter: String,
    pub enabled: bool,
}

pub struct WaterfallEngine<H: TimerHandle> {
    store: SliceStore,
    scale: ColorScale,
    window: ViewportWindow,
    selection: SelectionState,
    playback: PlaybackScheduler<H>,
    periodogram: PeriodogramView,
    palette: Palette,
    fft_size: u32,
    layout: PlotLayout,
    window_size: usize,
}

impl<H: TimerHandle> WaterfallEngine<H> {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            store: SliceStore::empty(),
            scale: ColorScale::default(),
            window: ViewportWindow::new(0, config.window_size),
            selection: SelectionState::default(),
            playback: PlaybackScheduler::new(config.default_fps),
            periodogram: PeriodogramView::default(),
            palette: config.default_palette,
            fft_size: config.fft_size,
            layout: config.layout(),
            window_size: config.window_size,
        }
    }

    pub fn store(&self) -> &SliceStore {
        &self.store
    }

    pub fn scale(&self) -> ColorScale {
        self.scale
    }

    pub fn window(&self) -> &ViewportWindow {
        &self.window
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn fft_size(&self) -> u32 {
        self.fft_size
    }

    pub fn layout(&self) -> PlotLayout {
        self.layout
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn fps(&self) -> u32 {
        self.playback.fps()
    }

    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.layout, &self.window)
    }

    pub fn apply(&mut self, action: Action) -> Redraw {
        let total = self.store.total();
        match action {
            Action::Load(store) => {
                self.playback.stop();
                self.scale = ColorScale::from_store(&store);
                self.window = ViewportWindow::new(store.total(), self.window_size);
                self.store = store;
                self.selection.reset();
                self.periodogram.invalidate();
                log::info!(
                    "Loaded {} slices, scale {:.1}..{:.1} dB",
                    self.store.total(),
                    self.scale.min,
                    self.scale.max
                );
                Redraw::ALL
            }
            Action::SelectIndex(index) => {
                if total == 0 {
                    return Redraw::NONE;
                }
                let changed = self.selection.set_current(index, total);
                self.follow_selection(changed)
            }
            Action::Step(delta) => {
                if total == 0 {
                    return Redraw::NONE;
                }
                let changed = self.selection.step(delta, total);
                self.follow_selection(changed)
            }
            Action::Scroll(direction) => {
                if self.window.scroll(direction, None) {
                    self.selection.set_hovered(None);
                    Redraw::VIEW
                } else {
                    Redraw::NONE
                }
            }
            Action::Click { y } => match self.mapper().pixel_to_index(y) {
                Some(index) => {
                    let changed = self.selection.set_current(index, total);
                    self.follow_selection(changed)
                }
                None => Redraw::NONE,
            },
            Action::Hover { y } => {
                let hovered = self.mapper().pixel_to_index(y);
                if self.selection.set_hovered(hovered) {
                    Redraw::OVERLAY
                } else {
                    Redraw::NONE
                }
            }
            Action::Leave => {
                if self.selection.set_hovered(None) {
                    Redraw::OVERLAY
                } else {
                    Redraw::NONE
                }
            }
            Action::SetPalette(palette) => {
                if palette == self.palette {
                    return Redraw::NONE;
                }
                self.palette = palette;
                Redraw { raster: true, ..Redraw::NONE }
            }
            Action::SetFftSize(size) => {
                self.fft_size = size;
                Redraw::NONE
            }
            Action::Resize { width, height } => {
                let resized = self.layout.resized(width, height);
                if resized == self.layout {
                    return Redraw::NONE;
                }
                self.layout = resized;
                // Canvases were resized and lost their contents.
                self.periodogram.invalidate();
                Redraw::ALL
            }
            Action::PlaybackTick => match self.playback.tick(&mut self.selection, total) {
                TickOutcome::Advanced(_) => self.follow_selection(true),
                TickOutcome::Stopped => Redraw::NONE,
            },
        }
    }

    /// Keep the selection on screen after it moved.
    fn follow_selection(&mut self, changed: bool) -> Redraw {
        let scrolled = self.window.ensure_visible(self.selection.current());
        match (changed, scrolled) {
            (_, true) => Redraw::ALL,
            (true, false) => Redraw::SELECTION,
            (false, false) => Redraw::NONE,
        }
    }

    /// Start playback. No-op with nothing loaded or when already playing.
    pub fn start_playback(&mut self, spawn: impl FnOnce(u32) -> H) -> bool {
        if self.store.is_empty() {
            return false;
        }
        self.playback.start(spawn)
    }

    pub fn stop_playback(&mut self) -> bool {
        self.playback.stop()
    }

    pub fn toggle_playback(&mut self, spawn: impl FnOnce(u32) -> H) -> bool {
        if self.playback.is_playing() {
            self.playback.stop();
        } else {
            self.start_playback(spawn);
        }
        self.playback.is_playing()
    }

    pub fn set_playback_speed(&mut self, fps: u32, spawn: impl FnOnce(u32) -> H) {
        self.playback.set_fps(fps, spawn);
    }

    /// Tear down: cancels any running timer.
    pub fn destroy(&mut self) {
        self.playback.destroy();
    }

    pub fn render_raster<S: DrawingSurface>(&self, surface: &mut S) {
        render_raster(
            surface,
            &RasterParams {
                store: &self.store,
                scale: self.scale,
                window: &self.window,
                layout: self.layout,
                palette: self.palette,
            },
        );
    }

    pub fn render_overlay<S: DrawingSurface>(&self, surface: &mut S) {
        render_overlay(surface, self.layout, &self.window, &self.selection);
    }

    pub fn render_periodogram<C: ChartSink>(&mut self, chart: &mut C) -> bool {
        let current = (!self.store.is_empty()).then(|| self.selection.current());
        self.periodogram.update(&self.store, current, chart)
    }

    /// Slider bounds and `k / total` counter; `0 / 0` when empty.
    pub fn slider_state(&self) -> SliderState {
        let total = self.store.total();
        if total == 0 {
            return SliderState {
                min: 0,
                max: 0,
                value: 0,
                counter: "0 / 0".to_string(),
                enabled: false,
            };
        }
        let current = self.selection.current();
        SliderState {
            min: 0,
            max: total - 1,
            value: current,
            counter: format!("{} / {}", slice_number(current), total),
            enabled: true,
        }
    }

    pub fn can_scroll_back(&self) -> bool {
        self.window.can_scroll_back()
    }

    pub fn can_scroll_forward(&self) -> bool {
        self.window.can_scroll_forward()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::periodogram::ChartPoint;
    use crate::playback::tests::FakeClock;
    use crate::types::Slice;

    #[derive(Default)]
    struct DrawCount(usize);

    impl ChartSink for DrawCount {
        fn show(&mut self, _index: Option<usize>, _points: &[ChartPoint]) {
            self.0 += 1;
        }
    }

    fn store(n: usize) -> SliceStore {
        SliceStore::new(
            (0..n)
                .map(|i| Some(Slice { sample_rate: 1000.0, power: vec![-60.0 + i as f32 % 10.0; 16] }))
                .collect(),
        )
    }

    fn engine(n: usize) -> WaterfallEngine<crate::playback::tests::FakeTimer> {
        let mut e = WaterfallEngine::new(&EngineConfig::default());
        e.apply(Action::Resize { width: 820.0, height: 520.0 });
        e.apply(Action::Load(store(n)));
        e
    }

    #[test]
    fn test_load_resets_state() {
        let mut e = engine(250);
        e.apply(Action::SelectIndex(120));
        let redraw = e.apply(Action::Load(store(10)));
        assert_eq!(redraw, Redraw::ALL);
        assert_eq!(e.selection().current(), 0);
        assert_eq!(e.window().start(), 0);
        assert_eq!(e.window().visible_rows(), 10);
    }

    #[test]
    fn test_selection_inside_window_skips_raster() {
        let mut e = engine(250);
        assert_eq!(e.apply(Action::SelectIndex(50)), Redraw::SELECTION);
        assert_eq!(e.apply(Action::SelectIndex(50)), Redraw::NONE);
        assert_eq!(e.apply(Action::Step(1)), Redraw::SELECTION);
        assert_eq!(e.selection().current(), 51);
    }

    #[test]
    fn test_out_of_range_index_clamps_to_last() {
        let mut e = engine(250);
        e.apply(Action::SelectIndex(9999));
        assert_eq!(e.selection().current(), 249);
        assert_eq!(e.slider_state().value, 249);
        // Already at the end: nothing changes, so the host must resync the
        // field itself.
        assert_eq!(e.apply(Action::SelectIndex(9999)), Redraw::NONE);
        assert_eq!(e.slider_state().value, 249);
    }

    #[test]
    fn test_selection_outside_window_scrolls() {
        let mut e = engine(250);
        assert_eq!(e.apply(Action::SelectIndex(180)), Redraw::ALL);
        assert_eq!(e.window().start(), 81);
    }

    #[test]
    fn test_scroll_is_independent_of_selection() {
        let mut e = engine(250);
        e.apply(Action::SelectIndex(5));
        assert_eq!(e.apply(Action::Scroll(ScrollDirection::Forward)), Redraw::VIEW);
        assert_eq!(e.window().start(), 100);
        assert_eq!(e.selection().current(), 5);
        assert_eq!(e.apply(Action::Scroll(ScrollDirection::Back)), Redraw::VIEW);
        assert_eq!(e.apply(Action::Scroll(ScrollDirection::Back)), Redraw::NONE);
    }

    #[test]
    fn test_hover_only_touches_overlay() {
        let mut e = engine(250);
        assert_eq!(e.apply(Action::Hover { y: 300.0 }), Redraw::OVERLAY);
        assert!(e.selection().hovered().is_some());
        assert_eq!(e.apply(Action::Hover { y: 300.0 }), Redraw::NONE);
        assert_eq!(e.apply(Action::Hover { y: 2.0 }), Redraw::OVERLAY);
        assert_eq!(e.selection().hovered(), None);
        e.apply(Action::Hover { y: 300.0 });
        assert_eq!(e.apply(Action::Leave), Redraw::OVERLAY);
        assert_eq!(e.selection().hovered(), None);
    }

    #[test]
    fn test_palette_and_fft_size() {
        let mut e = engine(10);
        assert_eq!(e.apply(Action::SetPalette(Palette::Classic)), Redraw::NONE);
        assert!(e.apply(Action::SetPalette(Palette::Ocean)).raster);
        assert_eq!(e.apply(Action::SetFftSize(4096)), Redraw::NONE);
        assert_eq!(e.fft_size(), 4096);
    }

    #[test]
    fn test_playback_follows_and_stops() {
        let clock = FakeClock::default();
        let mut e = engine(3);
        assert!(e.toggle_playback(clock.spawn()));
        assert_eq!(e.apply(Action::PlaybackTick), Redraw::SELECTION);
        assert_eq!(e.apply(Action::PlaybackTick), Redraw::SELECTION);
        assert_eq!(e.apply(Action::PlaybackTick), Redraw::NONE);
        assert!(!e.is_playing());
        assert_eq!(e.selection().current(), 2);
        assert_eq!(clock.running(), 0);
    }

    #[test]
    fn test_load_and_destroy_stop_playback() {
        let clock = FakeClock::default();
        let mut e = engine(30);
        e.start_playback(clock.spawn());
        e.apply(Action::Load(store(5)));
        assert!(!e.is_playing());
        e.start_playback(clock.spawn());
        e.destroy();
        assert_eq!(clock.running(), 0);
    }

    #[test]
    fn test_playback_needs_data() {
        let clock = FakeClock::default();
        let mut e = engine(0);
        assert!(!e.toggle_playback(clock.spawn()));
        assert!(clock.started.borrow().is_empty());
    }

    #[test]
    fn test_resize_redraws_every_layer() {
        let mut e = engine(250);
        let mut chart = DrawCount::default();
        assert!(e.render_periodogram(&mut chart));
        assert!(!e.render_periodogram(&mut chart));
        // 520 px minus 10 px margins, over 100 rows.
        assert!((e.mapper().row_height() - 5.0).abs() < 1e-9);

        assert_eq!(e.apply(Action::Resize { width: 820.0, height: 520.0 }), Redraw::NONE);
        assert!(!e.render_periodogram(&mut chart));

        assert_eq!(e.apply(Action::Resize { width: 640.0, height: 1020.0 }), Redraw::ALL);
        assert!(e.render_periodogram(&mut chart));
        assert_eq!(chart.0, 2);
        assert_eq!(e.layout().height, 1020.0);
        assert!((e.mapper().row_height() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_slider_state() {
        let mut e = engine(250);
        e.apply(Action::SelectIndex(9));
        let s = e.slider_state();
        assert_eq!((s.min, s.max, s.value), (0, 249, 9));
        assert_eq!(s.counter, "10 / 250");
        assert!(crate::periodogram::chart_title(Some(9)).ends_with("slice 10"));
        assert!(e.can_scroll_forward());
        assert!(!e.can_scroll_back());
    }
}
