//! Style state: layout variant, ink color and font choices

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visual theme of the card chrome
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum LayoutVariant {
    /// Plain card, no extra body class
    #[default]
    #[serde(alias = "default")]
    Classic,
    /// Bordered, aged-paper look
    Vintage,
    Borderless,
}

impl LayoutVariant {
    pub const ALL: [LayoutVariant; 3] =
        [LayoutVariant::Classic, LayoutVariant::Vintage, LayoutVariant::Borderless];

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutVariant::Classic => "classic",
            LayoutVariant::Vintage => "vintage",
            LayoutVariant::Borderless => "borderless",
        }
    }

    /// Class this variant adds to the page body, if any
    pub fn body_class(self) -> Option<&'static str> {
        match self {
            LayoutVariant::Classic => None,
            LayoutVariant::Vintage => Some("vintage"),
            LayoutVariant::Borderless => Some("borderless"),
        }
    }
}

impl fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" | "default" => Ok(LayoutVariant::Classic),
            "vintage" => Ok(LayoutVariant::Vintage),
            "borderless" => Ok(LayoutVariant::Borderless),
            other => Err(format!("Unknown layout variant: '{}'", other)),
        }
    }
}

/// Presentation choices shared by every ink-colored element
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StyleState {
    pub variant: LayoutVariant,

    /// Any CSS color string; not validated
    pub ink: String,

    /// Preset swatch matching `ink`, if any
    pub active_swatch: Option<usize>,

    /// CSS `font-family` value for body text
    pub body_font: String,

    /// CSS `font-family` value for handwritten elements
    pub hand_font: String,
}

impl StyleState {
    pub fn new(variant: LayoutVariant, ink: &str, presets: &[String], body_font: &str, hand_font: &str) -> Self {
        let mut state = Self {
            variant,
            ink: String::new(),
            active_swatch: None,
            body_font: body_font.to_string(),
            hand_font: hand_font.to_string(),
        };
        state.set_ink(ink, presets);
        state
    }

    /// Switch the layout variant. Returns the variant it replaced.
    pub fn set_variant(&mut self, variant: LayoutVariant) -> LayoutVariant {
        std::mem::replace(&mut self.variant, variant)
    }

    /// Set the ink color verbatim and resolve which preset swatch it matches
    pub fn set_ink(&mut self, color: &str, presets: &[String]) -> Option<usize> {
        self.ink = color.to_string();
        self.active_swatch = presets.iter().position(|p| p == color);
        self.active_swatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presets() -> Vec<String> {
        vec!["#d85c52".to_string(), "#2f3b8f".to_string()]
    }

    #[test]
    fn test_ink_matches_preset() {
        let mut style = StyleState::new(LayoutVariant::Borderless, "#d85c52", &presets(), "serif", "cursive");
        assert_eq!(style.active_swatch, Some(0));

        assert_eq!(style.set_ink("#2f3b8f", &presets()), Some(1));
        assert_eq!(style.set_ink("#123456", &presets()), None);
        assert_eq!(style.ink, "#123456");
    }

    #[test]
    fn test_invalid_color_passes_through() {
        let mut style = StyleState::new(LayoutVariant::Classic, "#d85c52", &presets(), "serif", "cursive");
        style.set_ink("not-a-color", &presets());
        assert_eq!(style.ink, "not-a-color");
        assert_eq!(style.active_swatch, None);
    }

    #[test]
    fn test_variant_round_trips_through_names() {
        for variant in LayoutVariant::ALL {
            assert_eq!(variant.as_str().parse::<LayoutVariant>(), Ok(variant));
        }
        assert_eq!("default".parse::<LayoutVariant>(), Ok(LayoutVariant::Classic));
        assert!("neon".parse::<LayoutVariant>().is_err());
    }

    #[test]
    fn test_default_alias_deserializes_as_classic() {
        let variant: LayoutVariant = serde_json::from_str("\"default\"").unwrap();
        assert_eq!(variant, LayoutVariant::Classic);
    }

    #[test]
    fn test_set_variant_is_repeatable() {
        let mut style = StyleState::new(LayoutVariant::Classic, "#d85c52", &presets(), "serif", "cursive");
        assert_eq!(style.set_variant(LayoutVariant::Vintage), LayoutVariant::Classic);
        assert_eq!(style.set_variant(LayoutVariant::Vintage), LayoutVariant::Vintage);
        assert_eq!(style.variant, LayoutVariant::Vintage);
    }
}
