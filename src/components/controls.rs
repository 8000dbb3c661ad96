use leptos::prelude::*;
use waterfall_core::color::Palette;
use waterfall_core::input::{parse_fft_size, FFT_SIZES};
use waterfall_core::playback::{parse_fps, PLAYBACK_SPEEDS};
use waterfall_core::viewport::ScrollDirection;
use waterfall_core::Action;

use crate::canvas::export::save_waterfall_png;
use crate::state::{dispatch, set_playback_speed, toggle_playback, AppState};

#[component]
pub fn WaterfallControls(raster_ref: NodeRef<leptos::html::Canvas>) -> impl IntoView {
    let state = expect_context::<AppState>();
    let disabled = move || !state.slider.with(|s| s.enabled);

    let on_save = move |_| {
        let Some(canvas) = raster_ref.get_untracked() else { return };
        let counter = state.slider.with_untracked(|s| s.counter.clone());
        let header = format!("Periodogram: slice {counter}");
        let capture = state.capture_id.get_untracked();
        if let Err(e) = save_waterfall_png(&canvas, &capture, &header) {
            log::error!("Export failed: {e}");
        }
    };

    view! {
        <div class="waterfall-controls">
            <div class="control-group">
                <button
                    class=move || if state.is_playing.get() { "btn playing" } else { "btn" }
                    prop:disabled=disabled
                    on:click=move |_| toggle_playback(state)
                    title=move || if state.is_playing.get() { "Pause playback" } else { "Play through slices" }
                >
                    {move || if state.is_playing.get() { "Pause" } else { "Play" }}
                </button>
                <select
                    class="speed-select"
                    title="Playback speed"
                    on:change=move |ev| match parse_fps(&event_target_value(&ev)) {
                        Ok(fps) => set_playback_speed(state, fps),
                        Err(e) => log::warn!("{e}"),
                    }
                >
                    {PLAYBACK_SPEEDS.iter().map(|&fps| view! {
                        <option value=fps.to_string() selected=move || state.fps.get() == fps>
                            {format!("{fps} fps")}
                        </option>
                    }).collect_view()}
                </select>
                <button class="btn" prop:disabled=disabled on:click=on_save title="Save waterfall as PNG">
                    "Save"
                </button>
            </div>

            <div class="control-group slice-nav">
                <button class="btn" prop:disabled=disabled title="Previous slice"
                    on:click=move |_| dispatch(state, Action::Step(-1))>"\u{2212}"</button>
                <span class="slider-min">{move || state.slider.with(|s| s.min)}</span>
                <input
                    type="range"
                    class="slice-slider"
                    min=move || state.slider.with(|s| s.min.to_string())
                    max=move || state.slider.with(|s| s.max.to_string())
                    prop:value=move || state.slider.with(|s| s.value.to_string())
                    prop:disabled=disabled
                    on:input=move |ev| {
                        if let Ok(index) = event_target_value(&ev).parse::<usize>() {
                            dispatch(state, Action::SelectIndex(index));
                        }
                    }
                />
                <span class="slider-max">{move || state.slider.with(|s| s.max)}</span>
                <button class="btn" prop:disabled=disabled title="Next slice"
                    on:click=move |_| dispatch(state, Action::Step(1))>"+"</button>
                <input
                    type="number"
                    class="slice-index"
                    min="0"
                    max=move || state.slider.with(|s| s.max.to_string())
                    prop:value=move || state.slider.with(|s| s.value.to_string())
                    prop:disabled=disabled
                    on:change=move |ev| {
                        if let Ok(index) = event_target_value(&ev).trim().parse::<usize>() {
                            dispatch(state, Action::SelectIndex(index));
                        }
                        // Out-of-range or unparsable entries leave the selection
                        // unchanged; snap the field back to it either way.
                        state.slider.update(|_| {});
                    }
                />
                <span class="slice-counter">{move || state.slider.with(|s| s.counter.clone())}</span>
            </div>

            <div class="control-group">
                <label>
                    "FFT "
                    <select
                        on:change=move |ev| match parse_fft_size(&event_target_value(&ev)) {
                            Ok(size) => dispatch(state, Action::SetFftSize(size)),
                            Err(e) => log::warn!("{e}"),
                        }
                    >
                        {FFT_SIZES.iter().map(|&size| view! {
                            <option value=size.to_string() selected=move || state.fft_size.get() == size>
                                {size.to_string()}
                            </option>
                        }).collect_view()}
                    </select>
                </label>
                <label>
                    "Palette "
                    <select
                        on:change={move |ev| match event_target_value(&ev).parse::<Palette>() {
                            Ok(palette) => dispatch(state, Action::SetPalette(palette)),
                            Err(e) => log::warn!("{e}"),
                        }}
                    >
                        {Palette::ALL.iter().map(|&palette| view! {
                            <option value=palette.as_str() selected=move || state.palette.get() == palette>
                                {palette.label()}
                            </option>
                        }).collect_view()}
                    </select>
                </label>
            </div>

            <div class="control-group scroll-nav">
                <button class="btn" title="Show newer slices (PageUp)"
                    prop:disabled=move || !state.can_scroll_forward.get()
                    on:click=move |_| dispatch(state, Action::Scroll(ScrollDirection::Forward))>
                    "Newer"
                </button>
                <button class="btn" title="Show older slices (PageDown)"
                    prop:disabled=move || !state.can_scroll_back.get()
                    on:click=move |_| dispatch(state, Action::Scroll(ScrollDirection::Back))>
                    "Older"
                </button>
                <span class=move || if state.can_scroll_forward.get() { "scroll-indicator active" } else { "scroll-indicator" }>
                    "\u{25b2} newer"
                </span>
                <span class=move || if state.can_scroll_back.get() { "scroll-indicator active" } else { "scroll-indicator" }>
                    "\u{25bc} older"
                </span>
            </div>
        </div>
    }
}
