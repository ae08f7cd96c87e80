//! In-memory surface
//!
//! Records every mutation so tests (and headless callers) can inspect what
//! the controller applied. Set nodes such as [`Node::GroupBubbles`] fan out to
//! every member the surface has already seen.

use std::collections::{BTreeMap, BTreeSet};

use super::{Node, Surface};
use crate::models::image::Rect;
use crate::print::PrintNode;

#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    classes: BTreeMap<Node, BTreeSet<String>>,
    styles: BTreeMap<Node, BTreeMap<String, String>>,
    texts: BTreeMap<Node, String>,
    values: BTreeMap<Node, String>,
    attributes: BTreeMap<Node, BTreeMap<String, String>>,
    options: BTreeMap<Node, Vec<(String, String)>>,
    rects: BTreeMap<Node, Rect>,
    trees: BTreeMap<Node, PrintNode>,
    mounted: BTreeMap<Node, Vec<PrintNode>>,
    pointer_captures: BTreeSet<(Node, i32)>,
    notices: Vec<String>,
    print_count: usize,
    mount_count: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `node` a bounding rect
    pub fn with_rect(mut self, node: Node, rect: Rect) -> Self {
        self.rects.insert(node, rect);
        self
    }

    /// Give `node` a subtree for `capture`
    pub fn with_tree(mut self, node: Node, tree: PrintNode) -> Self {
        self.trees.insert(node, tree);
        self
    }

    pub fn set_rect(&mut self, node: Node, rect: Rect) {
        self.rects.insert(node, rect);
    }

    /// Every key in `map` addressed by `node`: itself plus known members
    fn targets<V>(map: &BTreeMap<Node, V>, node: &Node) -> Vec<Node> {
        let mut targets: Vec<Node> = map.keys().filter(|k| node.contains(k)).cloned().collect();
        targets.push(node.clone());
        targets
    }

    pub fn has_class(&self, node: &Node, class: &str) -> bool {
        self.classes.get(node).map_or(false, |set| set.contains(class))
    }

    pub fn style(&self, node: &Node, property: &str) -> Option<&str> {
        self.styles.get(node).and_then(|s| s.get(property)).map(String::as_str)
    }

    pub fn text(&self, node: &Node) -> Option<&str> {
        self.texts.get(node).map(String::as_str)
    }

    pub fn value(&self, node: &Node) -> Option<&str> {
        self.values.get(node).map(String::as_str)
    }

    pub fn attribute(&self, node: &Node, name: &str) -> Option<&str> {
        self.attributes.get(node).and_then(|a| a.get(name)).map(String::as_str)
    }

    pub fn options(&self, node: &Node) -> &[(String, String)] {
        self.options.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn mounted(&self, node: &Node) -> &[PrintNode] {
        self.mounted.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of `mount` calls so far
    pub fn mount_count(&self) -> usize {
        self.mount_count
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn print_count(&self) -> usize {
        self.print_count
    }
}

impl Surface for RecordingSurface {
    fn set_class(&mut self, node: &Node, class: &str, on: bool) {
        for target in Self::targets(&self.classes, node) {
            let set = self.classes.entry(target).or_default();
            if on {
                set.insert(class.to_string());
            } else {
                set.remove(class);
            }
        }
    }

    fn set_style(&mut self, node: &Node, property: &str, value: Option<&str>) {
        for target in Self::targets(&self.styles, node) {
            let styles = self.styles.entry(target).or_default();
            match value {
                Some(v) => {
                    styles.insert(property.to_string(), v.to_string());
                }
                None => {
                    styles.remove(property);
                }
            }
        }
    }

    fn set_text(&mut self, node: &Node, text: &str) {
        self.texts.insert(node.clone(), text.to_string());
    }

    fn set_value(&mut self, node: &Node, value: &str) {
        for target in Self::targets(&self.values, node) {
            self.values.insert(target, value.to_string());
        }
    }

    fn set_attribute(&mut self, node: &Node, name: &str, value: Option<&str>) {
        let attributes = self.attributes.entry(node.clone()).or_default();
        match value {
            Some(v) => {
                attributes.insert(name.to_string(), v.to_string());
            }
            None => {
                attributes.remove(name);
            }
        }
    }

    fn add_option(&mut self, node: &Node, value: &str, label: &str) {
        self.options
            .entry(node.clone())
            .or_default()
            .push((value.to_string(), label.to_string()));
    }

    fn measure(&self, node: &Node) -> Option<Rect> {
        self.rects.get(node).copied()
    }

    fn capture(&self, node: &Node) -> Option<PrintNode> {
        self.trees.get(node).cloned()
    }

    fn mount(&mut self, node: &Node, children: &[PrintNode]) {
        self.mount_count += 1;
        self.mounted.insert(node.clone(), children.to_vec());
    }

    fn set_pointer_capture(&mut self, node: &Node, pointer_id: i32, on: bool) {
        if on {
            self.pointer_captures.insert((node.clone(), pointer_id));
        } else {
            self.pointer_captures.remove(&(node.clone(), pointer_id));
        }
    }

    fn has_pointer_capture(&self, node: &Node, pointer_id: i32) -> bool {
        self.pointer_captures.contains(&(node.clone(), pointer_id))
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn print(&mut self) {
        self.print_count += 1;
    }
}
