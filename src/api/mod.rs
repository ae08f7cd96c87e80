//! Compliment card WASM API
//!
//! - `helpers`: serde conversion and error mapping shared by the bindings
//! - `designer`: the `CardDesigner` class exported to JavaScript

pub mod helpers;
pub mod designer;

pub use designer::CardDesigner;
