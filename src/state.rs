//! Reactive UI state plus the single engine instance.
//!
//! The engine holds JS timer closures, so it lives in a thread-local rather
//! than a signal. Components never touch it directly: every mutation goes
//! through [`dispatch`], which applies the action, mirrors the engine into
//! the control signals, and bumps one revision counter per layer to repaint.

use std::cell::RefCell;

use leptos::prelude::*;
use waterfall_core::color::Palette;
use waterfall_core::config::EngineConfig;
use waterfall_core::engine::SliderState;
use waterfall_core::{Action, Redraw, WaterfallEngine};

use crate::timer::{interval_spawner, IntervalTimer};

pub type Engine = WaterfallEngine<IntervalTimer>;

thread_local! {
    static ENGINE: RefCell<Option<Engine>> = const { RefCell::new(None) };
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Empty,
    Failed(String),
}

#[derive(Clone, Copy)]
pub struct AppState {
    pub capture_id: RwSignal<String>,
    pub load_status: RwSignal<LoadStatus>,
    pub banner_dismissed: RwSignal<bool>,

    // Mirrors of engine state for the controls.
    pub slider: RwSignal<SliderState>,
    pub is_playing: RwSignal<bool>,
    pub fps: RwSignal<u32>,
    pub palette: RwSignal<Palette>,
    pub fft_size: RwSignal<u32>,
    pub can_scroll_back: RwSignal<bool>,
    pub can_scroll_forward: RwSignal<bool>,
    pub hovered: RwSignal<Option<usize>>,

    // Repaint triggers, one per layer.
    pub raster_rev: RwSignal<u32>,
    pub overlay_rev: RwSignal<u32>,
    pub periodogram_rev: RwSignal<u32>,
}

impl AppState {
    pub fn new(config: &EngineConfig, capture_id: String) -> Self {
        Self {
            capture_id: RwSignal::new(capture_id),
            load_status: RwSignal::new(LoadStatus::Loading),
            banner_dismissed: RwSignal::new(false),
            slider: RwSignal::new(SliderState {
                min: 0,
                max: 0,
                value: 0,
                counter: "0 / 0".to_string(),
                enabled: false,
            }),
            is_playing: RwSignal::new(false),
            fps: RwSignal::new(config.default_fps),
            palette: RwSignal::new(config.default_palette),
            fft_size: RwSignal::new(config.fft_size),
            can_scroll_back: RwSignal::new(false),
            can_scroll_forward: RwSignal::new(false),
            hovered: RwSignal::new(None),
            raster_rev: RwSignal::new(0),
            overlay_rev: RwSignal::new(0),
            periodogram_rev: RwSignal::new(0),
        }
    }
}

pub fn init_engine(config: &EngineConfig) {
    ENGINE.with(|e| *e.borrow_mut() = Some(WaterfallEngine::new(config)));
}

/// Cancel playback and drop the engine.
pub fn teardown() {
    ENGINE.with(|e| {
        if let Some(mut engine) = e.borrow_mut().take() {
            engine.destroy();
        }
    });
}

/// Run `f` against the engine, if one exists.
pub fn with_engine<R>(f: impl FnOnce(&mut Engine) -> R) -> Option<R> {
    ENGINE.with(|e| e.borrow_mut().as_mut().map(f))
}

/// The one entry point for input: apply, sync controls, schedule repaint.
pub fn dispatch(state: AppState, action: Action) {
    let redraw = with_engine(|e| e.apply(action)).unwrap_or(Redraw::NONE);
    finish(state, redraw);
}

pub fn toggle_playback(state: AppState) {
    with_engine(|e| e.toggle_playback(interval_spawner(state)));
    finish(state, Redraw::NONE);
}

pub fn set_playback_speed(state: AppState, fps: u32) {
    with_engine(|e| e.set_playback_speed(fps, interval_spawner(state)));
    finish(state, Redraw::NONE);
}

fn finish(state: AppState, redraw: Redraw) {
    sync_controls(state);
    if redraw.raster {
        state.raster_rev.update(|n| *n = n.wrapping_add(1));
    }
    if redraw.overlay {
        state.overlay_rev.update(|n| *n = n.wrapping_add(1));
    }
    if redraw.periodogram {
        state.periodogram_rev.update(|n| *n = n.wrapping_add(1));
    }
}

fn set_if_changed<T: PartialEq + Send + Sync + 'static>(signal: RwSignal<T>, value: T) {
    if signal.with_untracked(|v| *v != value) {
        signal.set(value);
    }
}

fn sync_controls(state: AppState) {
    let Some(snapshot) = with_engine(|e| {
        (
            e.slider_state(),
            e.is_playing(),
            e.fps(),
            e.palette(),
            e.fft_size(),
            e.can_scroll_back(),
            e.can_scroll_forward(),
            e.selection().hovered(),
        )
    }) else {
        return;
    };
    let (slider, playing, fps, palette, fft_size, back, forward, hovered) = snapshot;
    set_if_changed(state.slider, slider);
    set_if_changed(state.is_playing, playing);
    set_if_changed(state.fps, fps);
    set_if_changed(state.palette, palette);
    set_if_changed(state.fft_size, fft_size);
    set_if_changed(state.can_scroll_back, back);
    set_if_changed(state.can_scroll_forward, forward);
    set_if_changed(state.hovered, hovered);
}
