//! Designer configuration
//!
//! `CardConfig` carries the slider bounds, defaults and presets that the page
//! markup would otherwise declare. JavaScript may pass a partial object;
//! missing fields take the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::{CardError, CardResult};
use crate::models::style::LayoutVariant;
use crate::models::typography::LabelMode;
use crate::print::PrintMode;

/// Bounds and initial value of a range slider
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct SliderBounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl SliderBounds {
    pub const fn new(min: f64, max: f64, default: f64) -> Self {
        Self { min, max, default }
    }

    /// Clamp a raw slider value into `[min, max]`
    ///
    /// NaN input (an empty or unparsable slider value) falls back to the default.
    pub fn clamp(&self, raw: f64) -> f64 {
        if raw.is_nan() {
            return self.default;
        }
        raw.clamp(self.min, self.max)
    }

    fn validate(&self, name: &str) -> CardResult<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.default.is_finite()) {
            return Err(CardError::Config(format!("{} bounds must be finite", name)));
        }
        if self.min > self.max {
            return Err(CardError::Config(format!(
                "{} min {} is greater than max {}",
                name, self.min, self.max
            )));
        }
        if self.default < self.min || self.default > self.max {
            return Err(CardError::Config(format!(
                "{} default {} is outside [{}, {}]",
                name, self.default, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Complete designer configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CardConfig {
    /// Spacing scale slider
    pub spacing: SliderBounds,

    /// Font scale slider
    pub font_scale: SliderBounds,

    /// Image size slider, as a fraction of the card width
    pub image_size: SliderBounds,

    /// Tallest the image may render, as a fraction of the card height
    pub image_max_height_ratio: f64,

    /// How slider labels are presented
    pub label_mode: LabelMode,

    pub default_ink: String,

    /// Swatch colors, in display order
    pub ink_presets: Vec<String>,

    pub default_variant: LayoutVariant,

    pub default_body_font: String,

    pub default_hand_font: String,

    pub print_mode: PrintMode,

    /// Copies per sheet in live-clone mode
    pub clone_copies: usize,

    /// Cards per sheet in procedural-filler mode
    pub filler_copies: usize,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            spacing: SliderBounds::new(0.7, 1.3, 1.0),
            font_scale: SliderBounds::new(0.8, 1.3, 1.0),
            image_size: SliderBounds::new(0.12, 0.8, 0.28),
            image_max_height_ratio: 0.9,
            label_mode: LabelMode::Percent,
            default_ink: "#d85c52".to_string(),
            ink_presets: vec![
                "#d85c52".to_string(),
                "#2f3b8f".to_string(),
                "#1f1f1f".to_string(),
                "#2e7d4f".to_string(),
                "#8e44ad".to_string(),
            ],
            default_variant: LayoutVariant::Borderless,
            default_body_font: "'Patrick Hand', cursive".to_string(),
            default_hand_font: "'Caveat', cursive".to_string(),
            print_mode: PrintMode::LiveClone,
            clone_copies: 4,
            filler_copies: 6,
        }
    }
}

impl CardConfig {
    /// Check the configuration for values the engine cannot work with
    pub fn validate(&self) -> CardResult<()> {
        self.spacing.validate("spacing")?;
        self.font_scale.validate("font_scale")?;
        self.image_size.validate("image_size")?;

        if !(self.image_max_height_ratio > 0.0 && self.image_max_height_ratio <= 1.0) {
            return Err(CardError::Config(format!(
                "image_max_height_ratio {} must be in (0, 1]",
                self.image_max_height_ratio
            )));
        }
        if self.clone_copies == 0 || self.filler_copies == 0 {
            return Err(CardError::Config("print copy counts must be positive".to_string()));
        }
        Ok(())
    }

    /// Number of cards one print sheet holds in the configured mode
    pub fn copies_for(&self, mode: PrintMode) -> usize {
        match mode {
            PrintMode::LiveClone => self.clone_copies,
            PrintMode::ProceduralFiller => self.filler_copies,
        }
    }
}
