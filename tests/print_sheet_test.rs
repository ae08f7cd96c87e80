// Print sheet composition in both modes

use pretty_assertions::assert_eq;
use serde_json::json;

use compliment_card::print::{WordBanks, PRINT_CARD_CLASS, SLOT_CLASS};
use compliment_card::{CardConfig, CardController, CardError, CardEvent, LayoutVariant, Node, PrintMode, PrintNode, RecordingSurface};

fn card_tree() -> PrintNode {
    PrintNode::element("div")
        .with_attr("id", "card")
        .with_class("card")
        .with_child(
            PrintNode::element("div")
                .with_class("bubble-group")
                .with_child(PrintNode::element("button").with_class("bubble").with_class("selected").with_text("Hi"))
                .with_child(
                    PrintNode::element("input")
                        .with_attr("type", "text")
                        .with_class("bubble-input")
                        .with_class("has-value")
                        .with_value("Howdy"),
                ),
        )
        .with_child(
            PrintNode::element("input")
                .with_attr("type", "text")
                .with_attr("name", "name")
                .with_class("handwritten-input")
                .with_value("Sam"),
        )
}

fn controller(mode: PrintMode) -> CardController<RecordingSurface> {
    let surface = RecordingSurface::new().with_tree(Node::Card, card_tree());
    let config = CardConfig { print_mode: mode, ..Default::default() };
    let mut controller = CardController::new(config, surface).unwrap();
    controller.init();
    controller
}

#[test]
fn test_live_clone_mounts_four_copies() {
    let mut c = controller(PrintMode::LiveClone);
    let sheet = c.compose_print_sheet().unwrap().clone();

    assert_eq!(sheet.len(), 4);
    assert_eq!(c.surface().mounted(&Node::PrintSheet).len(), 4);
    for slot in &sheet.slots {
        assert!(slot.has_class(SLOT_CLASS));
    }
    for card in sheet.cards() {
        assert!(card.has_class(PRINT_CARD_CLASS));
        assert_eq!(card.count(|n| n.has_class("selected")), 0);
        assert_eq!(card.count(|n| n.has_class("has-value")), 0);
        assert_eq!(card.count(|n| n.value.as_deref() == Some("Sam")), 1);
        assert_eq!(card.count(|n| n.value.as_deref() == Some("Howdy")), 1);
    }
}

#[test]
fn test_filler_mounts_six_cards() {
    let mut c = controller(PrintMode::ProceduralFiller);
    c.set_variant(LayoutVariant::Vintage);
    c.pick_swatch("#2e7d4f");
    c.select_bubble("greeting", "Hi");

    let sheet = c.compose_print_sheet().unwrap().clone();

    assert_eq!(sheet.len(), 6);
    assert_eq!(c.surface().mounted(&Node::PrintSheet).len(), 6);
    for card in sheet.cards() {
        assert!(card.has_class("vintage"));
        assert_eq!(card.style.get("--ink-color").map(String::as_str), Some("#2e7d4f"));
        assert_eq!(card.count(|n| n.has_class("selected")), 0);
    }
}

#[test]
fn test_repeated_print_replaces_sheet() {
    let mut c = controller(PrintMode::LiveClone);
    c.dispatch(CardEvent::Print).unwrap();
    c.dispatch(CardEvent::Print).unwrap();

    assert_eq!(c.surface().mount_count(), 2);
    assert_eq!(c.surface().mounted(&Node::PrintSheet).len(), 4);
    assert_eq!(c.surface().print_count(), 2);

    c.set_print_mode(PrintMode::ProceduralFiller);
    c.dispatch(CardEvent::Print).unwrap();
    assert_eq!(c.surface().mounted(&Node::PrintSheet).len(), 6);
    assert_eq!(c.last_sheet().map(|s| s.mode), Some(PrintMode::ProceduralFiller));
}

#[test]
fn test_live_clone_without_card_fails() {
    let mut c = CardController::new(CardConfig::default(), RecordingSurface::new()).unwrap();
    c.init();

    let err = c.dispatch(CardEvent::Print).unwrap_err();
    assert_eq!(err, CardError::MissingNode("card".to_string()));
    assert_eq!(c.surface().print_count(), 0);
}

#[test]
fn test_sheet_serializes_as_node_tree() {
    let mut c = controller(PrintMode::LiveClone);
    let sheet = c.compose_print_sheet().unwrap();
    let value = serde_json::to_value(sheet).unwrap();

    assert_eq!(value["mode"], json!("live_clone"));
    assert_eq!(value["slots"].as_array().map(Vec::len), Some(4));
    assert_eq!(value["slots"][0]["classes"], json!(["print-card-slot"]));
    assert_eq!(value["slots"][0]["children"][0]["classes"], json!(["card", "print-card"]));
    assert_eq!(value["slots"][0]["children"][0]["attributes"], json!({ "id": "card" }));
}

const SHORT_BANKS: WordBanks = WordBanks {
    greetings: &["Ahoy"],
    introductions: &["I spotted"],
    qualities: &["a great hat"],
    closings: &["splendid"],
    timings: &["soon"],
    contacts: &["Phone"],
};

#[test]
fn test_filler_uses_replaced_word_banks() {
    let mut c = controller(PrintMode::ProceduralFiller);
    c.set_word_banks(SHORT_BANKS);

    let sheet = c.compose_print_sheet().unwrap();

    assert_eq!(sheet.len(), 6);
    for card in sheet.cards() {
        assert_eq!(card.count(|n| n.has_class("bubble")), 5);
        assert_eq!(card.count(|n| n.text.as_deref() == Some("Ahoy")), 1);
        assert_eq!(card.count(|n| n.text.as_deref() == Some("Hi")), 0);
    }
}
