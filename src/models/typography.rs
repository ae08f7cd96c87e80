//! Typography scaler
//!
//! Maps the spacing and font-size sliders to the presentation values applied
//! on the card. Every function here is a pure function of the slider value.
//!
//! Two label modes exist:
//! - `Percent`: labels show the clamped scale as a rounded percentage and the
//!   font scale is applied as a multiplier variable.
//! - `Banded`: labels come from a small table keyed on slider steps; the
//!   nearest key wins (ties go to the lower key), and the font scale maps to an
//!   absolute pixel size.

use serde::{Deserialize, Serialize};

use crate::config::SliderBounds;

/// How slider labels are presented
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LabelMode {
    #[default]
    Percent,
    Banded,
}

/// Base gap between card rows, in rem, at scale 1
pub const BASE_GAP_REM: f64 = 0.85;
/// Base vertical padding, in rem, at scale 1
pub const BASE_PADDING_BLOCK_REM: f64 = 1.5;
/// Base horizontal padding, in rem, at scale 1
pub const BASE_PADDING_INLINE_REM: f64 = 1.75;

/// CSS variable carrying the font multiplier
pub const FONT_SCALE_VAR: &str = "--card-font-scale";

/// Spacing labels keyed on slider position
pub const SPACING_BANDS: &[(f64, &str)] = &[
    (0.7, "Tight"),
    (0.85, "Cozy"),
    (1.0, "Balanced"),
    (1.15, "Roomy"),
    (1.3, "Airy"),
];

/// Font labels and absolute sizes (px) keyed on slider position
pub const FONT_BANDS: &[(f64, &str, f64)] = &[
    (0.8, "Small", 14.0),
    (0.9, "Medium", 16.0),
    (1.0, "Regular", 18.0),
    (1.1, "Large", 20.0),
    (1.2, "Larger", 22.0),
    (1.3, "Huge", 24.0),
];

/// Current slider positions (already clamped)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ScaleState {
    pub spacing: f64,
    pub font_scale: f64,
}

/// Derived spacing presentation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SpacingStyle {
    pub scale: f64,
    /// CSS `gap` value
    pub gap: String,
    /// CSS `padding` shorthand (block then inline)
    pub padding: String,
    pub label: String,
}

/// How the font scale reaches the card
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum FontSize {
    /// Value for the `--card-font-scale` variable; inline `font-size` is cleared
    Multiplier(String),
    /// Inline `font-size` value
    Absolute(String),
}

/// Derived font presentation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FontScaleStyle {
    pub scale: f64,
    pub size: FontSize,
    pub label: String,
}

fn percent_label(scale: f64) -> String {
    format!("{}%", (scale * 100.0).round() as i64)
}

fn rem(value: f64) -> String {
    format!("{:.3}rem", value)
}

/// Index of the key nearest to `value`; ties resolve to the earlier (lower) key
fn nearest_index<I: IntoIterator<Item = f64>>(keys: I, value: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, key) in keys.into_iter().enumerate() {
        let dist = (key - value).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

/// Spacing label for a clamped slider value, banded mode
pub fn spacing_band(scale: f64) -> &'static str {
    SPACING_BANDS[nearest_index(SPACING_BANDS.iter().map(|b| b.0), scale)].1
}

/// Font label and pixel size for a clamped slider value, banded mode
pub fn font_band(scale: f64) -> (&'static str, f64) {
    let (_, label, px) = FONT_BANDS[nearest_index(FONT_BANDS.iter().map(|b| b.0), scale)];
    (label, px)
}

/// Derive gap, padding and label from the spacing slider
pub fn spacing_style(bounds: &SliderBounds, mode: LabelMode, raw: f64) -> SpacingStyle {
    let scale = bounds.clamp(raw);
    let label = match mode {
        LabelMode::Percent => percent_label(scale),
        LabelMode::Banded => spacing_band(scale).to_string(),
    };

    SpacingStyle {
        scale,
        gap: rem(BASE_GAP_REM * scale),
        padding: format!(
            "{} {}",
            rem(BASE_PADDING_BLOCK_REM * scale),
            rem(BASE_PADDING_INLINE_REM * scale)
        ),
        label,
    }
}

/// Derive the font size presentation from the font slider
pub fn font_scale_style(bounds: &SliderBounds, mode: LabelMode, raw: f64) -> FontScaleStyle {
    let scale = bounds.clamp(raw);
    match mode {
        LabelMode::Percent => FontScaleStyle {
            scale,
            size: FontSize::Multiplier(format!("{:.3}", scale)),
            label: percent_label(scale),
        },
        LabelMode::Banded => {
            let (label, px) = font_band(scale);
            FontScaleStyle {
                scale,
                size: FontSize::Absolute(format!("{}px", px)),
                label: label.to_string(),
            }
        }
    }
}
