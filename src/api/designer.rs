//! `CardDesigner`: the object the page script drives
//!
//! The page wires DOM listeners to [`CardDesigner::dispatch`] with plain
//! event objects (`{ type: "bubble_click", group, value }` and so on) and
//! hands picked files to the upload methods, which return promises.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::File;

use super::helpers::{card_error, deserialize, is_absent, serialize};
use crate::config::CardConfig;
use crate::controller::CardController;
use crate::error::CardError;
use crate::print::PrintMode;
use crate::surface::CardEvent;
use crate::web::{font_loading_supported, load_font_face, read_as_data_url, DomSurface};

type SharedController = Rc<RefCell<CardController<DomSurface>>>;

#[wasm_bindgen]
pub struct CardDesigner {
    inner: SharedController,
}

#[wasm_bindgen]
impl CardDesigner {
    /// Create a designer bound to the current document and apply the
    /// initial state. `config` may be omitted for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<CardDesigner, JsValue> {
        let config: CardConfig = if is_absent(&config) {
            CardConfig::default()
        } else {
            deserialize(config, "Invalid card config")?
        };

        let surface = DomSurface::from_window().map_err(card_error)?;
        let mut controller = CardController::new(config, surface).map_err(card_error)?;
        controller.init();

        Ok(CardDesigner { inner: Rc::new(RefCell::new(controller)) })
    }

    /// Apply one input event
    pub fn dispatch(&self, event: JsValue) -> Result<(), JsValue> {
        let event: CardEvent = deserialize(event, "Invalid card event")?;
        self.inner.borrow_mut().dispatch(event).map_err(card_error)
    }

    /// Load an image file into the card. Resolves once the source is set;
    /// rejects on failure or when a newer upload superseded this one.
    #[wasm_bindgen(js_name = uploadImage)]
    pub fn upload_image(&self, file: File) -> js_sys::Promise {
        let inner = Rc::clone(&self.inner);
        let token = inner.borrow_mut().begin_image_upload();

        future_to_promise(async move {
            let result = read_as_data_url(&file).await;
            match inner.borrow_mut().finish_image_upload(token, result) {
                Ok(()) => Ok(JsValue::UNDEFINED),
                Err(CardError::StaleUpload { .. }) => Ok(JsValue::FALSE),
                Err(err) => Err(card_error(err)),
            }
        })
    }

    /// Register an uploaded font file and make it the body font
    #[wasm_bindgen(js_name = uploadBodyFont)]
    pub fn upload_body_font(&self, file: File) -> js_sys::Promise {
        let inner = Rc::clone(&self.inner);
        let pending = inner.borrow_mut().begin_font_upload(&file.name(), font_loading_supported());

        future_to_promise(async move {
            let pending = pending.map_err(card_error)?;
            let result = load_font_face(&pending.option.family, &file).await;
            inner
                .borrow_mut()
                .finish_font_upload(pending, result)
                .map(|_| JsValue::UNDEFINED)
                .map_err(card_error)
        })
    }

    /// `"live_clone"` or `"procedural_filler"`
    #[wasm_bindgen(js_name = setPrintMode)]
    pub fn set_print_mode(&self, mode: JsValue) -> Result<(), JsValue> {
        let mode: PrintMode = deserialize(mode, "Invalid print mode")?;
        self.inner.borrow_mut().set_print_mode(mode);
        Ok(())
    }

    /// Compose the print sheet without opening the dialog; returns it as JSON
    #[wasm_bindgen(js_name = printSheetJson)]
    pub fn print_sheet_json(&self) -> Result<String, JsValue> {
        let mut controller = self.inner.borrow_mut();
        let sheet = controller.compose_print_sheet().map_err(card_error)?;
        serde_json::to_string(sheet).map_err(|e| JsValue::from_str(&format!("Failed to serialize sheet: {}", e)))
    }

    /// Snapshot of the card state
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        serialize(self.inner.borrow().state(), "Failed to serialize card state")
    }
}
