use leptos::ev;
use leptos::prelude::*;
use waterfall_core::periodogram::slice_number;
use waterfall_core::Action;

use crate::canvas::surface::{sync_canvas_size, CanvasSurface};
use crate::state::{dispatch, with_engine, AppState};

const LAYER_STYLE: &str = "position: absolute; inset: 0; width: 100%; height: 100%; display: block;";

/// Raster and overlay canvases stacked in one box. Pointer input lands on
/// the overlay, which is the top layer.
#[component]
pub fn WaterfallCanvas(raster_ref: NodeRef<leptos::html::Canvas>) -> impl IntoView {
    let state = expect_context::<AppState>();
    let overlay_ref = NodeRef::<leptos::html::Canvas>::new();

    let sync_size = move || {
        let (Some(raster), Some(overlay)) = (raster_ref.get_untracked(), overlay_ref.get_untracked()) else {
            return;
        };
        let before = (raster.width(), raster.height());
        let Some((width, height)) = sync_canvas_size(&raster) else { return };
        if overlay.width() != width || overlay.height() != height {
            overlay.set_width(width);
            overlay.set_height(height);
        }
        dispatch(state, Action::Resize { width: width as f64, height: height as f64 });
        // Resizing a canvas wipes it even when the plot layout is unchanged.
        if before != (width, height) {
            state.raster_rev.update(|n| *n = n.wrapping_add(1));
            state.overlay_rev.update(|n| *n = n.wrapping_add(1));
        }
    };

    Effect::new(move || {
        if raster_ref.get().is_some() && overlay_ref.get().is_some() {
            sync_size();
        }
    });
    let resize = window_event_listener(ev::resize, move |_| sync_size());
    on_cleanup(move || resize.remove());

    Effect::new(move || {
        state.raster_rev.track();
        let Some(canvas) = raster_ref.get() else { return };
        let Some(mut surface) = CanvasSurface::new(&canvas) else { return };
        with_engine(|e| e.render_raster(&mut surface));
    });

    Effect::new(move || {
        state.overlay_rev.track();
        let Some(canvas) = overlay_ref.get() else { return };
        let Some(mut surface) = CanvasSurface::new(&canvas) else { return };
        with_engine(|e| e.render_overlay(&mut surface));
    });

    view! {
        <div class="waterfall-plot" style="position: relative; flex: 2; min-width: 320px; height: 60vh;">
            <canvas node_ref=raster_ref style=LAYER_STYLE />
            <canvas
                node_ref=overlay_ref
                style=format!("{LAYER_STYLE} cursor: crosshair;")
                on:click=move |ev: web_sys::MouseEvent| {
                    dispatch(state, Action::Click { y: ev.offset_y() as f64 });
                }
                on:mousemove=move |ev: web_sys::MouseEvent| {
                    dispatch(state, Action::Hover { y: ev.offset_y() as f64 });
                }
                on:mouseleave=move |_| dispatch(state, Action::Leave)
            />
            <div class="hover-readout" style="position: absolute; right: 8px; top: 4px; pointer-events: none;">
                {move || state.hovered.get().map(|i| format!("Slice {}", slice_number(i)))}
            </div>
        </div>
    }
}
