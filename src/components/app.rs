use leptos::ev;
use leptos::prelude::*;
use waterfall_core::config::ViewerConfig;
use waterfall_core::input::{is_form_field, key_action};

use crate::components::controls::WaterfallControls;
use crate::components::error_banner::ErrorBanner;
use crate::components::periodogram::PeriodogramPanel;
use crate::components::waterfall::WaterfallCanvas;
use crate::loader;
use crate::state::{dispatch, init_engine, teardown, AppState, LoadStatus};

/// Id of the optional JSON configuration block in the host page.
const CONFIG_ELEMENT_ID: &str = "waterfall-config";

fn read_config() -> ViewerConfig {
    let json = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    let mut config = match json {
        Some(json) => ViewerConfig::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed #{CONFIG_ELEMENT_ID}: {e}");
            ViewerConfig::default()
        }),
        None => ViewerConfig::default(),
    };
    if config.api.capture_id.is_empty() {
        if let Some(id) = capture_from_query() {
            config.api.capture_id = id;
        }
    }
    config
}

/// `?capture=<id>` from the page URL.
fn capture_from_query() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search).ok()?.get("capture")
}

fn focus_in_form_field() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.active_element())
        .map(|el| is_form_field(&el.tag_name()))
        .unwrap_or(false)
}

#[component]
pub fn App() -> impl IntoView {
    let config = read_config();
    let state = AppState::new(&config.engine, config.api.capture_id.clone());
    provide_context(state);
    init_engine(&config.engine);

    if config.api.capture_id.is_empty() {
        state
            .load_status
            .set(LoadStatus::Failed("No capture was specified.".to_string()));
    } else {
        wasm_bindgen_futures::spawn_local(loader::load_capture(state, config.api.clone()));
    }

    let keys = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if let Some(action) = key_action(&ev.key(), focus_in_form_field()) {
            ev.prevent_default();
            dispatch(state, action);
        }
    });
    on_cleanup(move || {
        keys.remove();
        teardown();
    });

    let raster_ref = NodeRef::<leptos::html::Canvas>::new();

    view! {
        <div class="waterfall-app">
            <ErrorBanner />
            <WaterfallControls raster_ref=raster_ref />
            <div class="waterfall-main" style="display: flex; gap: 12px;">
                <WaterfallCanvas raster_ref=raster_ref />
                <PeriodogramPanel />
            </div>
        </div>
    }
}
