//! Load sequence: status check, then slice download. Both must finish
//! before the view becomes interactive.

use leptos::prelude::Set;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use waterfall_core::api::{check_status, http_error, parse_slices};
use waterfall_core::config::ApiConfig;
use waterfall_core::decode::decode_slices;
use waterfall_core::{Action, LoadError, SliceStore};
use web_sys::Response;

use crate::state::{dispatch, AppState, LoadStatus};

fn js_error(e: wasm_bindgen::JsValue) -> LoadError {
    LoadError::Network(format!("{e:?}"))
}

/// GET `url` and return the body. Non-OK responses become [`LoadError::Http`].
async fn fetch_text(url: &str) -> Result<String, LoadError> {
    let window = web_sys::window().ok_or_else(|| LoadError::Network("No window object".into()))?;
    let value = JsFuture::from(window.fetch_with_str(url)).await.map_err(js_error)?;
    let response: Response = value
        .dyn_into()
        .map_err(|_| LoadError::Network("fetch did not return a Response".into()))?;
    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .unwrap_or_default();
    if !response.ok() {
        return Err(http_error(response.status(), &response.status_text(), &text));
    }
    Ok(text)
}

pub async fn fetch_capture(api: &ApiConfig) -> Result<SliceStore, LoadError> {
    let status = fetch_text(&api.status_url()).await?;
    check_status(&status)?;
    let body = fetch_text(&api.download_url()).await?;
    let raw = parse_slices(&body)?;
    Ok(decode_slices(&raw))
}

/// Fetch, decode and hand the capture to the engine. Failures end in the
/// banner; there is no retry short of reloading the view.
pub async fn load_capture(state: AppState, api: ApiConfig) {
    state.load_status.set(LoadStatus::Loading);
    state.banner_dismissed.set(false);
    log::info!("Loading waterfall for capture {}", api.capture_id);

    match fetch_capture(&api).await {
        Ok(store) => {
            let empty = store.is_empty();
            dispatch(state, Action::Load(store));
            state.load_status.set(if empty { LoadStatus::Empty } else { LoadStatus::Ready });
        }
        Err(e) => {
            log::error!("Waterfall load failed: {e}");
            state.load_status.set(LoadStatus::Failed(e.friendly_message()));
        }
    }
}
