pub mod canvas;
pub mod components;
pub mod loader;
pub mod state;
pub mod timer;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("console_log init failed: {e}").into());
    }
    leptos::mount::mount_to_body(components::app::App);
}
