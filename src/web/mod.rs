//! Browser bindings: the DOM surface and async file loaders

pub mod dom;
pub mod loaders;

pub use dom::DomSurface;
pub use loaders::{font_loading_supported, load_font_face, read_as_data_url};

use wasm_bindgen::{JsCast, JsValue};

/// Best-effort message out of a thrown JS value
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
