use crate::models::{ActionsBlock, Block, CheckboxGroup, MessageBlock, SectionBlock};

use super::{DONE_BLOCK_PREFIX, TITLE_BLOCK_PREFIX};

/// One structural unit of a rendered checklist
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment<'a> {
    Header(&'a MessageBlock),
    /// A meeting title and, unless already collapsed, its checkbox list
    Group {
        title: &'a SectionBlock,
        options: Option<GroupOptions<'a>>,
    },
    /// Marker of a group whose items were all checked
    Completed(&'a SectionBlock),
    Divider,
    /// Anything else; kept as-is and in place
    Passthrough(&'a MessageBlock),
}

/// The actions block under a title along with its checkbox element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupOptions<'a> {
    pub block: &'a ActionsBlock,
    pub checkboxes: &'a CheckboxGroup,
}

#[derive(Debug, Clone, Copy)]
enum RecognizerState<'a> {
    Scanning,
    /// Saw a title; the next block decides whether it has options
    AfterTitle(&'a SectionBlock),
}

fn has_prefix(block_id: Option<&str>, prefix: &str) -> bool {
    block_id.is_some_and(|id| id.starts_with(prefix))
}

fn as_title(block: &MessageBlock) -> Option<&SectionBlock> {
    match block {
        MessageBlock::Block(Block::Section(section)) if has_prefix(section.block_id.as_deref(), TITLE_BLOCK_PREFIX) => {
            Some(section)
        }
        _ => None,
    }
}

fn as_completed(block: &MessageBlock) -> Option<&SectionBlock> {
    match block {
        MessageBlock::Block(Block::Section(section)) if has_prefix(section.block_id.as_deref(), DONE_BLOCK_PREFIX) => {
            Some(section)
        }
        _ => None,
    }
}

fn as_options(block: &MessageBlock) -> Option<GroupOptions<'_>> {
    match block {
        MessageBlock::Block(Block::Actions(actions)) => actions.checkboxes().map(|checkboxes| GroupOptions {
            block: actions,
            checkboxes,
        }),
        _ => None,
    }
}

fn scan(block: &MessageBlock) -> (Option<Segment<'_>>, RecognizerState<'_>) {
    if let Some(title) = as_title(block) {
        return (None, RecognizerState::AfterTitle(title));
    }
    let segment = if let Some(done) = as_completed(block) {
        Segment::Completed(done)
    } else {
        match block {
            MessageBlock::Block(Block::Header(_)) => Segment::Header(block),
            MessageBlock::Block(Block::Divider(_)) => Segment::Divider,
            _ => Segment::Passthrough(block),
        }
    };
    (Some(segment), RecognizerState::Scanning)
}

/// Split a block sequence into checklist segments.
///
/// A title followed directly by a checkbox actions block forms one group;
/// a title followed by anything else is a group with no options and the
/// following block is recognized on its own.
pub fn recognize(blocks: &[MessageBlock]) -> Vec<Segment<'_>> {
    let mut segments = Vec::with_capacity(blocks.len());
    let mut state = RecognizerState::Scanning;

    for block in blocks {
        state = match state {
            RecognizerState::AfterTitle(title) => {
                if let Some(options) = as_options(block) {
                    segments.push(Segment::Group {
                        title,
                        options: Some(options),
                    });
                    RecognizerState::Scanning
                } else {
                    segments.push(Segment::Group { title, options: None });
                    let (segment, next) = scan(block);
                    segments.extend(segment);
                    next
                }
            }
            RecognizerState::Scanning => {
                let (segment, next) = scan(block);
                segments.extend(segment);
                next
            }
        };
    }

    if let RecognizerState::AfterTitle(title) = state {
        segments.push(Segment::Group { title, options: None });
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CheckboxOption, TextObject};

    fn option(text: &str) -> CheckboxOption {
        CheckboxOption {
            text: TextObject::mrkdwn(text),
            value: text.to_string(),
        }
    }

    fn kinds(segments: &[Segment<'_>]) -> Vec<&'static str> {
        segments
            .iter()
            .map(|s| match s {
                Segment::Header(_) => "header",
                Segment::Group { options: Some(_), .. } => "group",
                Segment::Group { options: None, .. } => "collapsed",
                Segment::Completed(_) => "completed",
                Segment::Divider => "divider",
                Segment::Passthrough(_) => "passthrough",
            })
            .collect()
    }

    #[test]
    fn test_recognize_units() {
        let blocks = vec![
            MessageBlock::header("Action Items"),
            MessageBlock::divider(),
            MessageBlock::section("*Your action items:*"),
            MessageBlock::section_with_id("meeting_title_0", "*A*"),
            MessageBlock::checkboxes("meeting_actions_0", "done_checkbox_0", vec![option("x")]),
            MessageBlock::divider(),
            MessageBlock::section_with_id("meeting_title_1", "*B*"),
            MessageBlock::divider(),
            MessageBlock::section_with_id("meeting_done_2", "~C~ done"),
            MessageBlock::section_with_id("meeting_title_3", "*D*"),
        ];

        let segments = recognize(&blocks);
        assert_eq!(
            kinds(&segments),
            vec![
                "header",
                "divider",
                "passthrough",
                "group",
                "divider",
                "collapsed",
                "divider",
                "completed",
                "collapsed",
            ]
        );

        let Segment::Group { title, options: Some(options) } = segments[3] else {
            panic!("expected group with options");
        };
        assert_eq!(title.text.text, "*A*");
        assert_eq!(options.checkboxes.options.len(), 1);
    }

    #[test]
    fn test_title_followed_by_title() {
        let blocks = vec![
            MessageBlock::section_with_id("meeting_title_0", "*A*"),
            MessageBlock::section_with_id("meeting_title_1", "*B*"),
            MessageBlock::checkboxes("meeting_actions_1", "done_checkbox_1", vec![option("y")]),
        ];
        assert_eq!(kinds(&recognize(&blocks)), vec!["collapsed", "group"]);
    }

    #[test]
    fn test_actions_without_title_passes_through() {
        let blocks = vec![MessageBlock::checkboxes("x", "y", vec![option("z")])];
        assert_eq!(kinds(&recognize(&blocks)), vec!["passthrough"]);
    }
}
