//! Input events consumed by the controller
//!
//! The host maps DOM events onto these variants. They deserialize from plain
//! objects tagged by `type`, e.g. `{ "type": "bubble_click", "group": "greeting", "value": "Hi" }`.

use serde::{Deserialize, Serialize};

use crate::models::style::LayoutVariant;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum CardEvent {
    BubbleClick { group: String, value: String },
    BubbleInput { group: String, text: String },
    FieldInput { name: String, text: String },

    StyleClick { variant: LayoutVariant },
    SwatchClick { color: String },
    CustomInk { color: String },

    SpacingInput { value: f64 },
    FontScaleInput { value: f64 },
    BodyFontChange { value: String },
    HandFontChange { value: String },

    /// Slider value as a fraction of the card width
    ImageSizeInput { value: f64 },
    /// The card image element finished loading
    ImageLoaded { natural_width: f64, natural_height: f64 },
    PointerDown { pointer_id: i32, client_x: f64, client_y: f64 },
    PointerMove { pointer_id: i32, client_x: f64, client_y: f64 },
    PointerUp { pointer_id: i32 },
    PointerCancel { pointer_id: i32 },
    LostPointerCapture { pointer_id: i32 },
    Resize,
    ClearImage,

    Reset,
    Print,
}

impl CardEvent {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            CardEvent::BubbleClick { .. } => "bubble_click",
            CardEvent::BubbleInput { .. } => "bubble_input",
            CardEvent::FieldInput { .. } => "field_input",
            CardEvent::StyleClick { .. } => "style_click",
            CardEvent::SwatchClick { .. } => "swatch_click",
            CardEvent::CustomInk { .. } => "custom_ink",
            CardEvent::SpacingInput { .. } => "spacing_input",
            CardEvent::FontScaleInput { .. } => "font_scale_input",
            CardEvent::BodyFontChange { .. } => "body_font_change",
            CardEvent::HandFontChange { .. } => "hand_font_change",
            CardEvent::ImageSizeInput { .. } => "image_size_input",
            CardEvent::ImageLoaded { .. } => "image_loaded",
            CardEvent::PointerDown { .. } => "pointer_down",
            CardEvent::PointerMove { .. } => "pointer_move",
            CardEvent::PointerUp { .. } => "pointer_up",
            CardEvent::PointerCancel { .. } => "pointer_cancel",
            CardEvent::LostPointerCapture { .. } => "lost_pointer_capture",
            CardEvent::Resize => "resize",
            CardEvent::ClearImage => "clear_image",
            CardEvent::Reset => "reset",
            CardEvent::Print => "print",
        }
    }
}
