//! Detached node tree used for print output
//!
//! A `PrintNode` is a plain description of an element: tag, classes,
//! attributes, inline style, optional text and (for inputs) the live value.
//! The surface captures the card into this form and builds real elements
//! back from it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tag used for text nodes
pub const TEXT_TAG: &str = "#text";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PrintNode {
    /// Lowercase tag name
    pub tag: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,

    /// Attributes other than `class` and `style`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// Inline style properties, including custom properties
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,

    /// Text content, for leaf elements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Current value, for form inputs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PrintNode>,
}

impl PrintNode {
    pub fn element(tag: &str) -> Self {
        Self { tag: tag.to_string(), ..Default::default() }
    }

    /// A bare text node (between elements in mixed content)
    pub fn text_node(text: &str) -> Self {
        Self { tag: TEXT_TAG.to_string(), text: Some(text.to_string()), ..Default::default() }
    }

    pub fn is_text_node(&self) -> bool {
        self.tag == TEXT_TAG
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.style.insert(property.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn with_child(mut self, child: PrintNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children<I: IntoIterator<Item = PrintNode>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn set_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Visit this node and every descendant, parents first
    pub fn walk_mut<F: FnMut(&mut PrintNode)>(&mut self, f: &mut F) {
        f(self);
        for child in &mut self.children {
            child.walk_mut(f);
        }
    }

    /// Visit this node and every descendant, parents first
    pub fn walk<F: FnMut(&PrintNode)>(&self, f: &mut F) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }

    /// Count nodes (self included) matching a predicate
    pub fn count<F: Fn(&PrintNode) -> bool>(&self, predicate: F) -> usize {
        let mut n = 0;
        self.walk(&mut |node| {
            if predicate(node) {
                n += 1;
            }
        });
        n
    }
}
