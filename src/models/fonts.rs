//! Uploaded font bookkeeping
//!
//! Every upload gets a synthesized family name (`"<display name> <n>"`) so two
//! files with the same name never collide. The registry only grows.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.[^.]+$").unwrap());
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_]+").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Display name used when a filename reduces to nothing
pub const FALLBACK_FONT_NAME: &str = "Custom Font";

/// Turn an uploaded filename into a readable font name
///
/// `"My-Cool_Font.otf"` becomes `"My Cool Font"`.
pub fn readable_font_name(filename: &str) -> String {
    let stem = EXTENSION.replace(filename, "");
    let spaced = SEPARATORS.replace_all(&stem, " ");
    WHITESPACE.replace_all(&spaced, " ").trim().to_string()
}

/// A selectable font choice
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FontOption {
    /// Registered family name
    pub family: String,
    /// Option value: the quoted family, usable as a CSS `font-family`
    pub value: String,
    pub label: String,
}

/// A font upload whose registration has not finished yet
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PendingFont {
    /// Upload request token; newer uploads have larger tokens
    pub token: u64,
    pub display_name: String,
    pub option: FontOption,
}

/// Append-only list of uploaded fonts
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FontRegistry {
    options: Vec<FontOption>,
    /// Uploads started so far; drives the family suffix
    uploads: u64,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a unique family name for an upload
    ///
    /// The counter advances even if the upload later fails.
    pub fn reserve(&mut self, filename: &str) -> PendingFont {
        self.uploads += 1;

        let mut display_name = readable_font_name(filename);
        if display_name.is_empty() {
            display_name = FALLBACK_FONT_NAME.to_string();
        }
        let family = format!("{} {}", display_name, self.uploads);

        PendingFont {
            token: self.uploads,
            option: FontOption {
                value: format!("'{}'", family),
                label: format!("{} (uploaded)", display_name),
                family,
            },
            display_name,
        }
    }

    /// Record a successfully loaded font. Returns false if the value is already listed.
    pub fn register(&mut self, option: FontOption) -> bool {
        if self.contains(&option.value) {
            return false;
        }
        self.options.push(option);
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    /// Token of the most recent upload
    pub fn latest_token(&self) -> u64 {
        self.uploads
    }

    pub fn options(&self) -> &[FontOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
