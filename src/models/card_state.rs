//! Card state management
//!
//! `CardState` is the single owner of everything the designer tracks for the
//! page session. Components receive it (or one of its parts) by reference;
//! nothing lives in free-standing globals.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::CardConfig;
use crate::models::fonts::FontRegistry;
use crate::models::image::{DragSession, ImageLimits, ImageState};
use crate::models::selection::SelectionModel;
use crate::models::style::StyleState;
use crate::models::typography::ScaleState;

/// Complete designer state (WASM-owned source of truth)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CardState {
    /// Bubble groups and their custom text
    pub selection: SelectionModel,

    /// Plain text fields outside bubble groups, keyed by field name
    pub fields: BTreeMap<String, String>,

    pub style: StyleState,

    pub scale: ScaleState,

    pub image: ImageState,

    pub image_limits: ImageLimits,

    #[serde(skip)]
    pub drag: DragSession,

    pub fonts: FontRegistry,
}

impl CardState {
    /// Fresh state seeded from configuration defaults
    pub fn new(config: &CardConfig) -> Self {
        let image_limits = ImageLimits {
            min_size: config.image_size.min * 100.0,
            max_size: config.image_size.max * 100.0,
            max_height_ratio: config.image_max_height_ratio,
        };

        Self {
            selection: SelectionModel::new(),
            fields: BTreeMap::new(),
            style: StyleState::new(
                config.default_variant,
                &config.default_ink,
                &config.ink_presets,
                &config.default_body_font,
                &config.default_hand_font,
            ),
            scale: ScaleState {
                spacing: config.spacing.default,
                font_scale: config.font_scale.default,
            },
            image: ImageState::new(image_limits.size_from_slider(config.image_size.default)),
            image_limits,
            drag: DragSession::default(),
            fonts: FontRegistry::new(),
        }
    }

    /// Record a plain text field. Returns whether it now shows "has-value".
    pub fn set_field(&mut self, name: &str, text: &str) -> bool {
        self.fields.insert(name.to_string(), text.to_string());
        !text.trim().is_empty()
    }

    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}
