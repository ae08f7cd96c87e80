//! Error types for card operations
//!
//! Every failure is terminal to the operation that raised it and leaves the
//! card in the state it held before the operation started.

use std::fmt;
use thiserror::Error;

/// Which kind of uploaded resource failed to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Image,
    Font,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Image => f.write_str("image"),
            ResourceKind::Font => f.write_str("font"),
        }
    }
}

/// Top-level error type for the card designer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CardError {
    /// The environment lacks a facility the operation needs (e.g. `FontFace`)
    #[error("Unsupported capability: {0}")]
    UnsupportedCapability(String),

    /// An uploaded file could not be decoded
    #[error("Could not load {kind}: {reason}")]
    ResourceLoad { kind: ResourceKind, reason: String },

    /// A completion arrived for an upload that a newer request superseded
    #[error("Stale upload result (token {token})")]
    StaleUpload { token: u64 },

    /// A required element is missing from the rendering surface
    #[error("Missing element: {0}")]
    MissingNode(String),

    /// Invalid configuration values
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CardError {
    pub fn image_load(reason: impl Into<String>) -> Self {
        CardError::ResourceLoad { kind: ResourceKind::Image, reason: reason.into() }
    }

    pub fn font_load(reason: impl Into<String>) -> Self {
        CardError::ResourceLoad { kind: ResourceKind::Font, reason: reason.into() }
    }

    /// The notice shown to the user for this error, if any
    pub fn user_notice(&self) -> Option<&'static str> {
        match self {
            CardError::UnsupportedCapability(_) => Some(FONT_UNSUPPORTED_NOTICE),
            CardError::ResourceLoad { kind: ResourceKind::Font, .. } => Some(FONT_LOAD_NOTICE),
            CardError::ResourceLoad { kind: ResourceKind::Image, .. } => Some(IMAGE_LOAD_NOTICE),
            CardError::StaleUpload { .. } | CardError::MissingNode(_) | CardError::Config(_) => None,
        }
    }
}

pub const FONT_UNSUPPORTED_NOTICE: &str = "This browser does not support loading local fonts.";
pub const FONT_LOAD_NOTICE: &str =
    "Could not load that font file. Try a .otf, .ttf, .woff, or .woff2 file.";
pub const IMAGE_LOAD_NOTICE: &str = "Could not load that image file.";

pub type CardResult<T> = Result<T, CardError>;
