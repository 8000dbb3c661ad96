//! "Save" action: raster canvas plus a periodogram header, as one PNG.

use wasm_bindgen::JsCast;
use waterfall_core::api::export_filename;
use web_sys::{HtmlAnchorElement, HtmlCanvasElement};

use crate::canvas::surface::get_canvas_ctx;

const HEADER_HEIGHT: u32 = 28;

/// Compose and download `waterfall_<capture>_<timestamp>.png`.
pub fn save_waterfall_png(
    raster: &HtmlCanvasElement,
    capture_id: &str,
    header: &str,
) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("Document unavailable")?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| "Unable to create canvas")?
        .dyn_into()
        .map_err(|_| "Canvas cast failed")?;
    canvas.set_width(raster.width());
    canvas.set_height(raster.height() + HEADER_HEIGHT);
    let ctx = get_canvas_ctx(&canvas).ok_or("Canvas context unavailable")?;

    ctx.set_fill_style_str("#000");
    ctx.fill_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    ctx.set_fill_style_str("rgba(255,255,255,0.8)");
    ctx.set_font("13px sans-serif");
    let _ = ctx.fill_text(header, 8.0, 18.0);
    ctx.draw_image_with_html_canvas_element(raster, 0.0, HEADER_HEIGHT as f64)
        .map_err(|_| "Unable to draw raster")?;

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| "Unable to serialise canvas")?;

    let stamp = String::from(js_sys::Date::new_0().to_iso_string());
    let filename = export_filename(capture_id, &stamp);

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "Unable to create link")?
        .dyn_into()
        .map_err(|_| "Link cast failed")?;
    anchor.set_href(&data_url);
    anchor.set_download(&filename);
    anchor.click();
    log::info!("Saved {filename}");
    Ok(())
}
