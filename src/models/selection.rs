//! Bubble selection model
//!
//! Each named group holds at most one active bubble, or a custom text
//! override, never both. Groups never affect one another.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Selection state of one bubble group
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionGroup {
    /// Value of the active bubble, if any
    pub active: Option<String>,

    /// Free text typed into the group's custom input (stored untrimmed)
    pub custom_text: String,

    /// Whether the custom input shows its "has-value" indicator
    pub custom_active: bool,
}

impl SelectionGroup {
    /// Whether the custom text counts as a value (non-blank)
    pub fn has_custom_value(&self) -> bool {
        !self.custom_text.trim().is_empty()
    }
}

/// All bubble groups on the card, keyed by group name
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionModel {
    groups: BTreeMap<String, SelectionGroup>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Click-to-toggle a bubble
    ///
    /// Deactivates every other bubble in the group and clears the group's
    /// custom text. Returns whether `value` is active afterwards.
    pub fn select_bubble(&mut self, group: &str, value: &str) -> bool {
        let entry = self.groups.entry(group.to_string()).or_default();

        let now_active = entry.active.as_deref() != Some(value);
        entry.active = if now_active { Some(value.to_string()) } else { None };

        entry.custom_text.clear();
        entry.custom_active = false;

        now_active
    }

    /// Record text typed into a group's custom input
    ///
    /// Non-blank text marks the input active and deactivates every bubble in
    /// the group. Blank text only clears the indicator.
    pub fn set_custom_text(&mut self, group: &str, text: &str) {
        let entry = self.groups.entry(group.to_string()).or_default();
        entry.custom_text = text.to_string();

        if text.trim().is_empty() {
            entry.custom_active = false;
        } else {
            entry.custom_active = true;
            entry.active = None;
        }
    }

    /// Reset every group to empty
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    pub fn group(&self, group: &str) -> Option<&SelectionGroup> {
        self.groups.get(group)
    }

    /// Value of the active bubble in `group`
    pub fn active(&self, group: &str) -> Option<&str> {
        self.groups.get(group).and_then(|g| g.active.as_deref())
    }

    pub fn custom_text(&self, group: &str) -> &str {
        self.groups.get(group).map(|g| g.custom_text.as_str()).unwrap_or("")
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &SelectionGroup)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v))
    }
}
