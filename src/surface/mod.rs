//! Rendering surface capability
//!
//! The controller never touches the DOM directly. It addresses elements by
//! [`Node`] and mutates them through the [`Surface`] trait; input arrives as
//! [`CardEvent`]s. The browser implementation lives in `web::dom`, and
//! [`recording::RecordingSurface`] keeps everything in memory for tests.

pub mod events;
pub mod recording;

pub use events::CardEvent;
pub use recording::RecordingSurface;

use serde::{Deserialize, Serialize};

use crate::models::image::Rect;
use crate::models::style::LayoutVariant;
use crate::print::PrintNode;

/// Addressable elements (or element sets) on the page
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case", tag = "node")]
pub enum Node {
    /// The page's root element (custom properties live here)
    Root,
    Body,
    Card,

    /// One preset bubble
    Bubble { group: String, value: String },
    /// Every bubble on the card
    Bubbles,
    /// Every bubble of a group
    GroupBubbles { group: String },
    /// The custom text input of a group
    BubbleInput { group: String },
    /// A plain text field outside bubble groups
    TextField { name: String },
    /// Every text input on the card (bubble inputs and plain fields)
    TextInputs,

    StyleButton { variant: LayoutVariant },
    StyleButtons,

    InkSwatch { color: String },
    InkSwatches,
    InkCustom,

    /// Every element that takes the body font
    FontTargets,
    BodyFontSelect,
    HandFontSelect,
    FontUpload,

    ImageLayer,
    CardImage,
    ImageUpload,
    ImageSizeSlider,
    ImageSizeLabel,

    SpacingSlider,
    SpacingLabel,
    FontSizeSlider,
    FontSizeLabel,

    PrintSheet,
}

impl Node {
    pub fn bubble(group: &str, value: &str) -> Self {
        Node::Bubble { group: group.to_string(), value: value.to_string() }
    }

    pub fn group_bubbles(group: &str) -> Self {
        Node::GroupBubbles { group: group.to_string() }
    }

    pub fn bubble_input(group: &str) -> Self {
        Node::BubbleInput { group: group.to_string() }
    }

    pub fn text_field(name: &str) -> Self {
        Node::TextField { name: name.to_string() }
    }

    pub fn swatch(color: &str) -> Self {
        Node::InkSwatch { color: color.to_string() }
    }

    /// Whether `self` is a set that includes `other`
    pub fn contains(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::GroupBubbles { group }, Node::Bubble { group: g, .. }) => group == g,
            (Node::Bubbles, Node::Bubble { .. }) => true,
            (Node::TextInputs, Node::BubbleInput { .. } | Node::TextField { .. }) => true,
            (Node::StyleButtons, Node::StyleButton { .. }) => true,
            (Node::InkSwatches, Node::InkSwatch { .. }) => true,
            _ => false,
        }
    }
}

/// Mutation and query capability over the rendering surface
///
/// Mutations addressed to a node that does not exist are ignored, the same
/// way a query selector matching nothing is.
pub trait Surface {
    /// Add or remove a class on every element `node` matches
    fn set_class(&mut self, node: &Node, class: &str, on: bool);

    /// Set an inline style property (custom properties included); `None` removes it
    fn set_style(&mut self, node: &Node, property: &str, value: Option<&str>);

    fn set_text(&mut self, node: &Node, text: &str);

    /// Set the value of a form control
    fn set_value(&mut self, node: &Node, value: &str);

    /// Set an attribute; `None` removes it
    fn set_attribute(&mut self, node: &Node, name: &str, value: Option<&str>);

    /// Append an `<option>` to a select
    fn add_option(&mut self, node: &Node, value: &str, label: &str);

    /// Bounding rect of a single element
    fn measure(&self, node: &Node) -> Option<Rect>;

    /// Detached copy of an element subtree, with live input values
    fn capture(&self, node: &Node) -> Option<PrintNode>;

    /// Replace the children of a container
    fn mount(&mut self, node: &Node, children: &[PrintNode]);

    /// Take (`on`) or release pointer capture for a pointer on an element
    fn set_pointer_capture(&mut self, node: &Node, pointer_id: i32, on: bool);

    fn has_pointer_capture(&self, node: &Node, pointer_id: i32) -> bool;

    /// Show a blocking notice to the user
    fn notify(&mut self, message: &str);

    /// Open the print dialog
    fn print(&mut self);
}
