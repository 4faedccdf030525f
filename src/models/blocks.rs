use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Block Kit text object kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    PlainText,
    Mrkdwn,
}

/// Block Kit text object.
///
/// Fields Slack adds on the way back (`emoji`, `verbatim`) are kept in
/// `extra` so a block read from a message serializes back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextObject {
    #[serde(rename = "type")]
    pub kind: TextKind,
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::PlainText,
            text: text.into(),
            extra: Map::new(),
        }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::Mrkdwn,
            text: text.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderBlock {
    pub text: TextObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DividerBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    pub text: TextObject,
}

/// One checkbox; `value` is opaque to Slack and round-trips on interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckboxOption {
    pub text: TextObject,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckboxGroup {
    pub action_id: String,
    #[serde(default)]
    pub options: Vec<CheckboxOption>,
    /// Options Slack reports as already ticked when the message was sent
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initial_options: Vec<CheckboxOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Checkboxes(CheckboxGroup),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionsBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    pub elements: Vec<Element>,
}

impl ActionsBlock {
    /// The checkbox group this block carries, if its first element is one
    pub fn checkboxes(&self) -> Option<&CheckboxGroup> {
        match self.elements.first() {
            Some(Element::Checkboxes(group)) => Some(group),
            None => None,
        }
    }
}

/// Block kinds the checklist builds and recognizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header(HeaderBlock),
    Divider(DividerBlock),
    Section(SectionBlock),
    Actions(ActionsBlock),
}

/// A block of a message as it travels through Slack.
///
/// Anything that does not parse as a [`Block`] is carried as raw JSON and
/// written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageBlock {
    Block(Block),
    Unrecognized(Value),
}

impl MessageBlock {
    pub fn header(text: impl Into<String>) -> Self {
        Block::Header(HeaderBlock {
            text: TextObject::plain(text),
            block_id: None,
        })
        .into()
    }

    pub fn divider() -> Self {
        Block::Divider(DividerBlock::default()).into()
    }

    pub fn section(text: impl Into<String>) -> Self {
        Block::Section(SectionBlock {
            block_id: None,
            text: TextObject::mrkdwn(text),
        })
        .into()
    }

    pub fn section_with_id(block_id: impl Into<String>, text: impl Into<String>) -> Self {
        Block::Section(SectionBlock {
            block_id: Some(block_id.into()),
            text: TextObject::mrkdwn(text),
        })
        .into()
    }

    pub fn checkboxes(
        block_id: impl Into<String>,
        action_id: impl Into<String>,
        options: Vec<CheckboxOption>,
    ) -> Self {
        Block::Actions(ActionsBlock {
            block_id: Some(block_id.into()),
            elements: vec![Element::Checkboxes(CheckboxGroup {
                action_id: action_id.into(),
                options,
                initial_options: Vec::new(),
            })],
        })
        .into()
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            MessageBlock::Block(block) => Some(block),
            MessageBlock::Unrecognized(_) => None,
        }
    }

    pub fn is_divider(&self) -> bool {
        matches!(self, MessageBlock::Block(Block::Divider(_)))
    }

    /// Section text, if this is a section block
    pub fn section_text(&self) -> Option<&str> {
        match self {
            MessageBlock::Block(Block::Section(section)) => Some(&section.text.text),
            _ => None,
        }
    }
}

impl From<Block> for MessageBlock {
    fn from(block: Block) -> Self {
        MessageBlock::Block(block)
    }
}

/// Number of checkbox options left across all actions blocks
pub fn count_options(blocks: &[MessageBlock]) -> usize {
    blocks
        .iter()
        .filter_map(|b| match b {
            MessageBlock::Block(Block::Actions(actions)) => Some(actions),
            _ => None,
        })
        .flat_map(|actions| actions.elements.iter())
        .map(|Element::Checkboxes(group)| group.options.len())
        .sum()
}
