//! Async file loaders: data URLs for images, `FontFace` for fonts

use js_sys::{Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileReader, FontFace, Url};

use crate::error::{CardError, CardResult};
use crate::web::js_error_message;

/// Whether the environment exposes the `FontFace` constructor
pub fn font_loading_supported() -> bool {
    Reflect::has(&js_sys::global(), &JsValue::from_str("FontFace")).unwrap_or(false)
}

/// Read a file into a `data:` URL
pub async fn read_as_data_url(file: &File) -> CardResult<String> {
    let reader = FileReader::new().map_err(|e| CardError::image_load(js_error_message(&e)))?;

    let promise = Promise::new(&mut |resolve, reject| {
        reader.set_onload(Some(&resolve));
        reader.set_onerror(Some(&reject));
    });
    reader
        .read_as_data_url(file)
        .map_err(|e| CardError::image_load(js_error_message(&e)))?;

    let outcome = JsFuture::from(promise).await;
    reader.set_onload(None);
    reader.set_onerror(None);
    outcome.map_err(|_| CardError::image_load("file could not be read"))?;

    reader
        .result()
        .map_err(|e| CardError::image_load(js_error_message(&e)))?
        .as_string()
        .ok_or_else(|| CardError::image_load("reader produced no data URL"))
}

/// Load a font file under `family` and add it to `document.fonts`
///
/// The object URL is revoked whether or not loading succeeds.
pub async fn load_font_face(family: &str, file: &File) -> CardResult<()> {
    let url = Url::create_object_url_with_blob(file).map_err(|e| CardError::font_load(js_error_message(&e)))?;
    let outcome = register_font(family, &url).await;
    if let Err(err) = Url::revoke_object_url(&url) {
        log::warn!("Could not revoke font URL: {}", js_error_message(&err));
    }
    outcome
}

async fn register_font(family: &str, url: &str) -> CardResult<()> {
    let face = FontFace::new_with_str(family, &format!("url({})", url))
        .map_err(|e| CardError::font_load(js_error_message(&e)))?;
    let loading = face.load().map_err(|e| CardError::font_load(js_error_message(&e)))?;
    let loaded = JsFuture::from(loading)
        .await
        .map_err(|e| CardError::font_load(js_error_message(&e)))?;
    let face: FontFace = loaded.dyn_into().unwrap_or(face);

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| CardError::MissingNode("document".to_string()))?;
    document
        .fonts()
        .add(&face)
        .map_err(|e| CardError::font_load(js_error_message(&e)))?;
    Ok(())
}
