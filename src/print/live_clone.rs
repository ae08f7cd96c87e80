//! Live-clone print mode
//!
//! Copies the captured card verbatim, then strips the indicators that only
//! make sense while editing: `selected` on bubbles and `has-value` on bubble
//! inputs. Plain text fields keep both their value and their indicator.

use super::{slot, PrintMode, PrintNode, PrintSheet, PRINT_CARD_CLASS};

pub const BUBBLE_CLASS: &str = "bubble";
pub const BUBBLE_INPUT_CLASS: &str = "bubble-input";
pub const SELECTED_CLASS: &str = "selected";
pub const HAS_VALUE_CLASS: &str = "has-value";

/// One print copy of the captured card
pub fn clone_card_for_print(card: &PrintNode) -> PrintNode {
    let mut clone = card.clone();
    clone.add_class(PRINT_CARD_CLASS);

    clone.walk_mut(&mut |node| {
        if node.has_class(BUBBLE_CLASS) {
            node.remove_class(SELECTED_CLASS);
        }
        if node.has_class(BUBBLE_INPUT_CLASS) {
            node.remove_class(HAS_VALUE_CLASS);
        }
    });

    clone
}

/// A sheet of `copies` slots, each holding a print copy of `card`
pub fn compose_live_clone(card: &PrintNode, copies: usize) -> PrintSheet {
    let slots = (0..copies).map(|_| slot(clone_card_for_print(card))).collect();
    PrintSheet { mode: PrintMode::LiveClone, slots }
}
