use regex::Regex;
use tracing::debug;

use crate::models::{ActionItem, MeetingActionGroup};

/// Who counts as the checklist owner
#[derive(Debug, Clone)]
pub struct AttributionConfig {
    /// Speaker label of the owner's own microphone
    pub self_tag: String,
    /// Name that marks an item as the owner's when mentioned as a word
    pub owner_name: Option<String>,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            self_tag: "me".to_string(),
            owner_name: None,
        }
    }
}

/// Decides whether an item belongs to the owner
#[derive(Debug, Clone)]
pub struct OwnerMatcher {
    tag_prefix: String,
    name: Option<Regex>,
}

impl OwnerMatcher {
    pub fn new(config: &AttributionConfig) -> Result<Self, regex::Error> {
        let name = config
            .owner_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(n))))
            .transpose()?;

        Ok(Self {
            tag_prefix: format!("({})", config.self_tag),
            name,
        })
    }

    /// Owner items start with the self tag or mention the owner by name
    pub fn is_owner_text(&self, display: &str) -> bool {
        display.starts_with(&self.tag_prefix)
            || self.name.as_ref().is_some_and(|re| re.is_match(display))
    }

    pub fn is_owner(&self, item: &ActionItem) -> bool {
        self.is_owner_text(&item.display())
    }
}

/// Groups split by ownership, owner first when rendered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub owner: Vec<MeetingActionGroup>,
    pub other: Vec<MeetingActionGroup>,
    /// Source meetings with at least one item; a meeting split across both
    /// sides counts once
    pub meetings: usize,
}

impl Partition {
    pub fn is_empty(&self) -> bool {
        self.owner.is_empty() && self.other.is_empty()
    }
}

/// Split each group's items into owner and other items.
///
/// Item order within a meeting is kept on both sides. A meeting appears on a
/// side only if it has an item there, so one meeting can appear on both.
pub fn partition_by_owner(groups: &[MeetingActionGroup], matcher: &OwnerMatcher) -> Partition {
    let mut partition = Partition::default();

    for group in groups {
        if !group.is_empty() {
            partition.meetings += 1;
        }
        let (owner, other): (Vec<ActionItem>, Vec<ActionItem>) = group
            .items
            .iter()
            .cloned()
            .partition(|item| matcher.is_owner(item));

        debug!(
            "{}: {} owner items, {} other items",
            group.title,
            owner.len(),
            other.len()
        );

        if !owner.is_empty() {
            partition
                .owner
                .push(MeetingActionGroup::new(group.title.clone(), owner));
        }
        if !other.is_empty() {
            partition
                .other
                .push(MeetingActionGroup::new(group.title.clone(), other));
        }
    }

    partition
}
