//! Print sheet composition
//!
//! Builds the set of card copies mounted into the print container right before
//! the print dialog opens. Each composition produces a whole new sheet; the
//! container's previous contents are replaced, never appended to.
//!
//! # Modes
//!
//! - `LiveClone`: copies of the card as currently rendered, with the
//!   interactive-only indicators stripped.
//! - `ProceduralFiller`: reference cards generated from word banks, styled
//!   with the current fonts, ink and layout variant.

pub mod filler;
pub mod live_clone;
pub mod node;
pub mod word_banks;

pub use filler::{compose_filler, FillerStyle};
pub use live_clone::{clone_card_for_print, compose_live_clone};
pub use node::PrintNode;
pub use word_banks::WordBanks;

use serde::{Deserialize, Serialize};

/// Class of each page slot wrapping one card
pub const SLOT_CLASS: &str = "print-card-slot";
/// Class added to every printed card
pub const PRINT_CARD_CLASS: &str = "print-card";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PrintMode {
    #[default]
    LiveClone,
    ProceduralFiller,
}

/// A composed print sheet: one slot per printed card
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PrintSheet {
    pub mode: PrintMode,
    pub slots: Vec<PrintNode>,
}

impl PrintSheet {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The card inside each slot
    pub fn cards(&self) -> impl Iterator<Item = &PrintNode> {
        self.slots.iter().filter_map(|slot| slot.children.first())
    }
}

/// Wrap a card in its page slot
pub(crate) fn slot(card: PrintNode) -> PrintNode {
    PrintNode::element("div").with_class(SLOT_CLASS).with_child(card)
}
