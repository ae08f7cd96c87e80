//! Procedural-filler print mode
//!
//! Generates reference cards from the word banks instead of copying the live
//! card. Every chip row lists its whole bank (rotated per card so the sheet
//! varies), with blank handwriting lines where a person would write. The
//! user's own selections never appear; only the current fonts, ink and layout
//! variant carry over.

use serde::{Deserialize, Serialize};

use super::word_banks::WordBanks;
use super::{slot, PrintMode, PrintNode, PrintSheet, PRINT_CARD_CLASS};
use crate::models::style::{LayoutVariant, StyleState};

pub const FILLER_CARD_CLASS: &str = "filler-card";
pub const HANDWRITTEN_LINE_CLASS: &str = "handwritten-line";

/// Presentation applied uniformly to every generated card
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FillerStyle {
    pub body_font: String,
    pub hand_font: String,
    pub ink: String,
    pub variant: LayoutVariant,
}

impl From<&StyleState> for FillerStyle {
    fn from(style: &StyleState) -> Self {
        Self {
            body_font: style.body_font.clone(),
            hand_font: style.hand_font.clone(),
            ink: style.ink.clone(),
            variant: style.variant,
        }
    }
}

struct CardBuilder<'a> {
    style: &'a FillerStyle,
    index: usize,
}

impl CardBuilder<'_> {
    fn text(&self, text: &str) -> PrintNode {
        PrintNode::element("span")
            .with_class("card-text")
            .with_style("font-family", &self.style.body_font)
            .with_text(text)
    }

    fn blank_line(&self) -> PrintNode {
        PrintNode::element("span").with_class(HANDWRITTEN_LINE_CLASS)
    }

    fn chips(&self, group: &str, bank: &[&'static str]) -> PrintNode {
        let chips = WordBanks::rotated(bank, self.index).into_iter().map(|word| {
            PrintNode::element("span")
                .with_class("bubble")
                .with_attr("data-group", group)
                .with_style("font-family", &self.style.body_font)
                .with_text(word)
        });
        PrintNode::element("div")
            .with_class("bubble-group")
            .with_attr("data-group", group)
            .with_children(chips)
    }

    fn row(&self, name: &str, children: Vec<PrintNode>) -> PrintNode {
        PrintNode::element("div")
            .with_class("card-row")
            .with_attr("data-row", name)
            .with_children(children)
    }

    fn build(&self, banks: &WordBanks) -> PrintNode {
        let contacts = banks.contacts.iter().map(|contact| {
            PrintNode::element("label")
                .with_child(self.text(&format!("{}:", contact)))
                .with_child(self.blank_line())
        });

        let mut card = PrintNode::element("div")
            .with_class("card")
            .with_class(PRINT_CARD_CLASS)
            .with_class(FILLER_CARD_CLASS)
            .with_attr("data-variant", self.style.variant.as_str())
            .with_style("font-family", &self.style.body_font)
            .with_style("--ink-color", &self.style.ink)
            .with_style("--hand-font", &self.style.hand_font)
            .with_child(self.row(
                "greeting",
                vec![self.chips("greeting", banks.greetings), self.blank_line(), self.text(",")],
            ))
            .with_child(self.row(
                "introduction",
                vec![self.chips("introduction", banks.introductions), self.text("you have")],
            ))
            .with_child(self.row("quality", vec![self.chips("quality", banks.qualities), self.blank_line()]))
            .with_child(self.row(
                "closing",
                vec![self.text("Have a"), self.chips("closing", banks.closings), self.text("day!")],
            ))
            .with_child(self.row("timing", vec![self.text("Message me"), self.chips("timing", banks.timings)]))
            .with_child(PrintNode::element("div").with_class("side-fields").with_children(contacts));

        if let Some(class) = self.style.variant.body_class() {
            card.add_class(class);
        }
        card
    }
}

/// A sheet of `copies` generated cards
pub fn compose_filler(style: &FillerStyle, banks: &WordBanks, copies: usize) -> PrintSheet {
    let slots = (0..copies)
        .map(|index| slot(CardBuilder { style, index }.build(banks)))
        .collect();
    PrintSheet { mode: PrintMode::ProceduralFiller, slots }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::print::word_banks::DEFAULT_WORD_BANKS;

    fn style() -> FillerStyle {
        FillerStyle {
            body_font: "'Patrick Hand', cursive".to_string(),
            hand_font: "'Caveat', cursive".to_string(),
            ink: "#2f3b8f".to_string(),
            variant: LayoutVariant::Vintage,
        }
    }

    fn chip_texts(card: &PrintNode, group: &str) -> Vec<String> {
        let mut out = Vec::new();
        card.walk(&mut |n| {
            if n.has_class("bubble") && n.attr("data-group") == Some(group) {
                out.push(n.text.clone().unwrap_or_default());
            }
        });
        out
    }

    #[test]
    fn test_six_cards() {
        let sheet = compose_filler(&style(), &DEFAULT_WORD_BANKS, 6);
        assert_eq!(sheet.len(), 6);
        assert_eq!(sheet.mode, PrintMode::ProceduralFiller);
    }

    #[test]
    fn test_every_card_lists_whole_banks() {
        let sheet = compose_filler(&style(), &DEFAULT_WORD_BANKS, 6);
        for card in sheet.cards() {
            let mut greetings = chip_texts(card, "greeting");
            greetings.sort();
            let mut expected: Vec<String> = DEFAULT_WORD_BANKS.greetings.iter().map(|s| s.to_string()).collect();
            expected.sort();
            assert_eq!(greetings, expected);
            assert_eq!(chip_texts(card, "quality").len(), DEFAULT_WORD_BANKS.qualities.len());
            assert_eq!(card.count(|n| n.has_class("selected")), 0);
        }
    }

    #[test]
    fn test_cards_rotate_leading_word() {
        let sheet = compose_filler(&style(), &DEFAULT_WORD_BANKS, 3);
        let leads: Vec<String> = sheet.cards().map(|c| chip_texts(c, "greeting")[0].clone()).collect();
        assert_eq!(leads, vec!["Hi", "Hey", "Hello"]);
    }

    #[test]
    fn test_style_applied_uniformly() {
        let sheet = compose_filler(&style(), &DEFAULT_WORD_BANKS, 6);
        for card in sheet.cards() {
            assert!(card.has_class("vintage"));
            assert!(card.has_class(PRINT_CARD_CLASS));
            assert_eq!(card.style.get("--ink-color").map(String::as_str), Some("#2f3b8f"));
            assert_eq!(card.style.get("--hand-font").map(String::as_str), Some("'Caveat', cursive"));
            assert_eq!(card.style.get("font-family").map(String::as_str), Some("'Patrick Hand', cursive"));
        }
    }

    #[test]
    fn test_classic_adds_no_variant_class() {
        let mut classic = style();
        classic.variant = LayoutVariant::Classic;
        let sheet = compose_filler(&classic, &DEFAULT_WORD_BANKS, 1);
        let card = sheet.cards().next().unwrap();
        assert!(!card.has_class("vintage") && !card.has_class("borderless"));
        assert_eq!(card.attr("data-variant"), Some("classic"));
    }
}
