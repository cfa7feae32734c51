//! WASM bindings for the image crate.
//!
//! These let the browser page hand a dropped file and its form settings to
//! the pipeline and get encoded bytes back for download.

use crate::{form, process_image, OutputFormat, Settings};
use wasm_bindgen::prelude::*;

/// Resize and convert an image file.
///
/// # Arguments
/// * `data` - Bytes of the selected file
/// * `settings_json` - Settings blob (same shape as the persisted preferences)
///
/// # Returns
/// Encoded output bytes
#[wasm_bindgen(js_name = processImage)]
pub fn process_image_js(data: &[u8], settings_json: &str) -> Result<Vec<u8>, JsValue> {
    let settings = Settings::from_json(settings_json);
    process_image(data, &settings.to_options())
        .map(|out| out.bytes)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Height linked to a new width, or `undefined` to clear the field.
#[wasm_bindgen(js_name = syncHeight)]
pub fn sync_height(width: i32, aspect_ratio: f64) -> Option<u32> {
    form::linked_height(width as i64, aspect_ratio)
}

/// Width linked to a new height, or `undefined` to clear the field.
#[wasm_bindgen(js_name = syncWidth)]
pub fn sync_width(height: i32, aspect_ratio: f64) -> Option<u32> {
    form::linked_width(height as i64, aspect_ratio)
}

/// Download file name for the chosen format (`jpeg` or `png`).
#[wasm_bindgen(js_name = outputFileName)]
pub fn output_file_name(
    custom: &str,
    original_file_name: &str,
    format: &str,
) -> Result<String, JsValue> {
    let format: OutputFormat = format
        .parse()
        .map_err(|e: crate::ImageError| JsValue::from_str(&e.to_string()))?;
    Ok(form::output_file_name(custom, original_file_name, format))
}

/// Settings blob after lenient parsing, re-serialized with defaults filled in.
#[wasm_bindgen(js_name = normalizeSettings)]
pub fn normalize_settings(settings_json: &str) -> Result<String, JsValue> {
    Settings::from_json(settings_json)
        .to_json()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
