//! Models module for the compliment card designer
//!
//! This module contains the state types and the pure rules that keep them
//! consistent: bubble selection, style, typography scaling, image placement
//! and uploaded fonts.

pub mod card_state;
pub mod fonts;
pub mod image;
pub mod selection;
pub mod style;
pub mod typography;

// Re-export commonly used types
pub use card_state::CardState;
pub use fonts::{FontOption, FontRegistry, PendingFont};
pub use image::{DragSession, ImageLimits, ImageState, Placement, PointerPos, Rect};
pub use selection::{SelectionGroup, SelectionModel};
pub use style::{LayoutVariant, StyleState};
pub use typography::{FontScaleStyle, FontSize, LabelMode, ScaleState, SpacingStyle};
