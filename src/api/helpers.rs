//! Shared helpers for the JS-facing API: serde conversion and error mapping

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::CardError;

/// Deserialize a value from JavaScript, logging failures
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value to JavaScript, logging failures
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Convert a card error to a thrown JS error
pub fn card_error(err: CardError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Whether a JS argument was left out
pub fn is_absent(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}
