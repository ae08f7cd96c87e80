//! Compliment Card WASM Module
//!
//! Card state, its rendering onto the page and the print sheet built from it.
//! The core (`models`, `controller`, `print`) is platform-neutral and talks to
//! the page through the `surface::Surface` trait; `web` and `api` bind it to
//! the browser.

pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod print;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod api;
#[cfg(target_arch = "wasm32")]
pub mod web;

// Re-export commonly used types
pub use config::{CardConfig, SliderBounds};
pub use controller::CardController;
pub use error::{CardError, CardResult};
pub use models::*;
pub use print::{PrintMode, PrintNode, PrintSheet};
pub use surface::{CardEvent, Node, RecordingSurface, Surface};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(feature = "console_log")]
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Compliment card WASM module initialized");
}
