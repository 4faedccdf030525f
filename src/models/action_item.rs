use serde::{Deserialize, Serialize};

use super::Speaker;

/// One extracted commitment, tagged with whoever said the originating line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub speaker: Speaker,
    /// Whitespace-collapsed context text, at most 200 chars plus `...`
    pub text: String,
}

impl ActionItem {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }

    /// Rendered form, `(<speaker>) <text>`.
    ///
    /// Checklist option values carry exactly this string, so anything that
    /// matches items across renders must go through here.
    pub fn display(&self) -> String {
        format!("({}) {}", self.speaker.label(), self.text)
    }
}

/// Action items found in one meeting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingActionGroup {
    pub title: String,
    pub items: Vec<ActionItem>,
}

impl MeetingActionGroup {
    pub fn new(title: impl Into<String>, items: Vec<ActionItem>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Total number of items across groups
pub fn total_items(groups: &[MeetingActionGroup]) -> usize {
    groups.iter().map(MeetingActionGroup::len).sum()
}
