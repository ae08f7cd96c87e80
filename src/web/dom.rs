//! DOM-backed surface
//!
//! Maps each [`Node`] to a CSS selector and applies mutations through
//! `web-sys`. Selectors that match nothing are silently skipped; JS
//! exceptions from individual calls are logged and swallowed so one bad
//! element never aborts a whole render.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, Window};

use crate::error::{CardError, CardResult};
use crate::models::image::Rect;
use crate::models::style::LayoutVariant;
use crate::print::PrintNode;
use crate::surface::{Node, Surface};
use crate::web::js_error_message;

const ELEMENT_NODE: u16 = 1;
const TEXT_NODE: u16 = 3;

const CARD_SELECTOR: &str = "#card";

/// Elements that take the body font alongside the card itself
const FONT_TARGETS: &str = ".bubble, .bubble-input, .card-text, .handwritten-input, .side-fields input";

pub struct DomSurface {
    window: Window,
    document: Document,
}

/// Escape a value for use inside a double-quoted attribute selector
fn quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn selector(node: &Node) -> Option<String> {
    let sel = match node {
        Node::Root | Node::Body => return None,
        Node::Card => CARD_SELECTOR.to_string(),
        Node::Bubble { group, value } => {
            format!(".bubble[data-group=\"{}\"][data-value=\"{}\"]", quoted(group), quoted(value))
        }
        Node::Bubbles => ".bubble".to_string(),
        Node::GroupBubbles { group } => format!(".bubble[data-group=\"{}\"]", quoted(group)),
        Node::BubbleInput { group } => format!(".bubble-input[data-group=\"{}\"]", quoted(group)),
        Node::TextField { name } => format!("input[type=\"text\"][name=\"{}\"]", quoted(name)),
        Node::TextInputs => "input[type=\"text\"]".to_string(),
        Node::StyleButton { variant: LayoutVariant::Classic } => {
            ".style-btn[data-style=\"classic\"], .style-btn[data-style=\"default\"]".to_string()
        }
        Node::StyleButton { variant } => format!(".style-btn[data-style=\"{}\"]", variant),
        Node::StyleButtons => ".style-btn".to_string(),
        Node::InkSwatch { color } => format!(".ink-swatch[data-color=\"{}\"]", quoted(color)),
        Node::InkSwatches => ".ink-swatch".to_string(),
        Node::InkCustom => "#ink-custom".to_string(),
        Node::FontTargets => FONT_TARGETS.to_string(),
        Node::BodyFontSelect => "#opt-font-body".to_string(),
        Node::HandFontSelect => "#opt-font-hand".to_string(),
        Node::FontUpload => "#opt-font-upload".to_string(),
        Node::ImageLayer => "#card-image-layer".to_string(),
        Node::CardImage => "#card-image".to_string(),
        Node::ImageUpload => "#opt-image-upload".to_string(),
        Node::ImageSizeSlider => "#opt-image-size".to_string(),
        Node::ImageSizeLabel => "#image-size-label".to_string(),
        Node::SpacingSlider => "#opt-spacing".to_string(),
        Node::SpacingLabel => "#spacing-label".to_string(),
        Node::FontSizeSlider => "#opt-font-size".to_string(),
        Node::FontSizeLabel => "#font-size-label".to_string(),
        Node::PrintSheet => "#print-sheet".to_string(),
    };
    Some(sel)
}

/// Nodes looked up inside the live card only. Print copies repeat the
/// card's markup (ids included) and must not pick up selection changes.
fn card_scoped(node: &Node) -> bool {
    matches!(
        node,
        Node::Bubble { .. } | Node::Bubbles | Node::GroupBubbles { .. } | Node::BubbleInput { .. }
    )
}

fn node_list_elements(list: web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

fn warn_on_err(what: &str, result: Result<(), wasm_bindgen::JsValue>) {
    if let Err(err) = result {
        log::warn!("{} failed: {}", what, js_error_message(&err));
    }
}

impl DomSurface {
    pub fn from_window() -> CardResult<Self> {
        let window = web_sys::window().ok_or_else(|| CardError::MissingNode("window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| CardError::MissingNode("document".to_string()))?;
        Ok(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Every element `node` addresses
    fn elements(&self, node: &Node) -> Vec<Element> {
        match node {
            Node::Root => self.document.document_element().into_iter().collect(),
            Node::Body => self.document.body().map(Element::from).into_iter().collect(),
            _ => {
                let Some(sel) = selector(node) else {
                    return Vec::new();
                };
                // Id selectors address one element; print clones repeat the card's ids
                if sel.starts_with('#') {
                    return self.document.query_selector(&sel).ok().flatten().into_iter().collect();
                }
                let list = if card_scoped(node) {
                    match self.document.query_selector(CARD_SELECTOR).ok().flatten() {
                        Some(card) => card.query_selector_all(&sel),
                        None => return Vec::new(),
                    }
                } else {
                    self.document.query_selector_all(&sel)
                };
                match list {
                    Ok(list) => node_list_elements(list),
                    Err(err) => {
                        log::warn!("Bad selector '{}': {}", sel, js_error_message(&err));
                        Vec::new()
                    }
                }
            }
        }
    }

    fn element(&self, node: &Node) -> Option<Element> {
        self.elements(node).into_iter().next()
    }

    fn capture_element(element: &Element) -> PrintNode {
        let mut out = PrintNode::element(&element.local_name());

        let classes = element.class_list();
        for i in 0..classes.length() {
            if let Some(class) = classes.item(i) {
                out.add_class(&class);
            }
        }

        let names = element.get_attribute_names();
        for name in names.iter().filter_map(|n| n.as_string()) {
            if name == "class" {
                continue;
            }
            if let Some(value) = element.get_attribute(&name) {
                out.attributes.insert(name, value);
            }
        }

        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            out.value = Some(input.value());
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            out.value = Some(select.value());
        }

        let children = element.child_nodes();
        for i in 0..children.length() {
            let Some(child) = children.get(i) else { continue };
            match child.node_type() {
                ELEMENT_NODE => {
                    if let Ok(child) = child.dyn_into::<Element>() {
                        out.children.push(Self::capture_element(&child));
                    }
                }
                TEXT_NODE => {
                    if let Some(text) = child.text_content() {
                        out.children.push(PrintNode::text_node(&text));
                    }
                }
                _ => {}
            }
        }
        out
    }

    fn build(&self, node: &PrintNode) -> Result<web_sys::Node, wasm_bindgen::JsValue> {
        if node.is_text_node() {
            let text = self.document.create_text_node(node.text.as_deref().unwrap_or(""));
            return Ok(text.into());
        }

        let element = self.document.create_element(&node.tag)?;
        if !node.classes.is_empty() {
            element.set_attribute("class", &node.classes.join(" "))?;
        }
        for (name, value) in &node.attributes {
            element.set_attribute(name, value)?;
        }
        if !node.style.is_empty() {
            if let Some(html) = element.dyn_ref::<HtmlElement>() {
                let style = html.style();
                for (property, value) in &node.style {
                    style.set_property(property, value)?;
                }
            }
        }
        if let Some(text) = &node.text {
            element.set_text_content(Some(text));
        }
        for child in &node.children {
            element.append_child(&self.build(child)?)?;
        }
        if let Some(value) = &node.value {
            if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
                input.set_value(value);
            } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
                select.set_value(value);
            }
        }
        Ok(element.into())
    }
}

impl Surface for DomSurface {
    fn set_class(&mut self, node: &Node, class: &str, on: bool) {
        for element in self.elements(node) {
            let result = element.class_list().toggle_with_force(class, on).map(|_| ());
            warn_on_err("classList.toggle", result);
        }
    }

    fn set_style(&mut self, node: &Node, property: &str, value: Option<&str>) {
        for element in self.elements(node) {
            let Some(html) = element.dyn_ref::<HtmlElement>() else { continue };
            let style = html.style();
            let result = match value {
                Some(v) => style.set_property(property, v),
                None => style.remove_property(property).map(|_| ()),
            };
            warn_on_err("style update", result);
        }
    }

    fn set_text(&mut self, node: &Node, text: &str) {
        for element in self.elements(node) {
            element.set_text_content(Some(text));
        }
    }

    fn set_value(&mut self, node: &Node, value: &str) {
        for element in self.elements(node) {
            if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
                input.set_value(value);
            } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
                select.set_value(value);
            }
        }
    }

    fn set_attribute(&mut self, node: &Node, name: &str, value: Option<&str>) {
        for element in self.elements(node) {
            let result = match value {
                Some(v) => element.set_attribute(name, v),
                None => element.remove_attribute(name),
            };
            warn_on_err("attribute update", result);
        }
    }

    fn add_option(&mut self, node: &Node, value: &str, label: &str) {
        let Some(select) = self.element(node) else { return };
        let result = self.document.create_element("option").and_then(|option| {
            option.set_attribute("value", value)?;
            option.set_text_content(Some(label));
            select.append_child(&option).map(|_| ())
        });
        warn_on_err("add option", result);
    }

    fn measure(&self, node: &Node) -> Option<Rect> {
        let rect = self.element(node)?.get_bounding_client_rect();
        Some(Rect::new(rect.left(), rect.top(), rect.width(), rect.height()))
    }

    fn capture(&self, node: &Node) -> Option<PrintNode> {
        self.element(node).map(|element| Self::capture_element(&element))
    }

    fn mount(&mut self, node: &Node, children: &[PrintNode]) {
        let Some(container) = self.element(node) else {
            log::warn!("No container for {:?}; print sheet not mounted", node);
            return;
        };
        container.set_inner_html("");
        for child in children {
            let result = self.build(child).and_then(|built| container.append_child(&built).map(|_| ()));
            warn_on_err("mount", result);
        }
    }

    fn set_pointer_capture(&mut self, node: &Node, pointer_id: i32, on: bool) {
        let Some(element) = self.element(node) else { return };
        let result = if on {
            element.set_pointer_capture(pointer_id)
        } else {
            element.release_pointer_capture(pointer_id)
        };
        warn_on_err("pointer capture", result);
    }

    fn has_pointer_capture(&self, node: &Node, pointer_id: i32) -> bool {
        self.element(node).map_or(false, |e| e.has_pointer_capture(pointer_id))
    }

    fn notify(&mut self, message: &str) {
        warn_on_err("alert", self.window.alert_with_message(message));
    }

    fn print(&mut self) {
        warn_on_err("print", self.window.print());
    }
}
