use chrono::NaiveDate;
use tracing::debug;

use crate::models::{
    ActionsBlock, Block, CheckboxGroup, CheckboxOption, CheckedSet, CheckedValue, Element,
    MessageBlock, SectionBlock,
};

use super::{
    ChecklistState, DONE_BLOCK_PREFIX, GroupOptions, Segment, TITLE_BLOCK_PREFIX, all_done_blocks,
    recognize,
};

/// Next checklist after a round of checked items
#[derive(Debug, Clone, PartialEq)]
pub struct ReduceOutcome {
    pub blocks: Vec<MessageBlock>,
    pub state: ChecklistState,
    /// Options still unchecked across all groups
    pub remaining: usize,
}

impl ReduceOutcome {
    /// Notification text for the updated message
    pub fn fallback_text(&self) -> String {
        match self.state {
            ChecklistState::HasPending => format!("{} action item(s) remaining", self.remaining),
            ChecklistState::AllDone => "All done!".to_string(),
        }
    }
}

/// Item text an option stands for
fn option_text(option: &CheckboxOption) -> String {
    CheckedValue::parse(&option.value).into_text()
}

/// Texts Slack reports as already ticked anywhere in the message
fn previously_checked(blocks: &[MessageBlock], checked: &CheckedSet) -> CheckedSet {
    let mut done = checked.clone();
    for block in blocks {
        if let MessageBlock::Block(Block::Actions(actions)) = block {
            for Element::Checkboxes(group) in &actions.elements {
                for option in &group.initial_options {
                    done.insert(option_text(option));
                }
            }
        }
    }
    done
}

fn completed_marker(title: &SectionBlock) -> MessageBlock {
    let index = title
        .block_id
        .as_deref()
        .and_then(|id| id.strip_prefix(TITLE_BLOCK_PREFIX))
        .unwrap_or_default();
    let clean_title = title.text.text.trim_matches('*');
    MessageBlock::section_with_id(
        format!("{DONE_BLOCK_PREFIX}{index}"),
        format!("~{clean_title}~ \u{2014} all done :white_check_mark:"),
    )
}

fn rebuilt_actions(options: GroupOptions<'_>, remaining: Vec<CheckboxOption>) -> MessageBlock {
    Block::Actions(ActionsBlock {
        block_id: options.block.block_id.clone(),
        elements: vec![Element::Checkboxes(CheckboxGroup {
            action_id: options.checkboxes.action_id.clone(),
            options: remaining,
            initial_options: Vec::new(),
        })],
    })
    .into()
}

/// Derive the next checklist from the current one and the checked items.
///
/// Options whose item text is checked, or which the message already lists
/// as initially checked, are removed. A group left with no options becomes
/// a completed marker. When no group has options left the whole message
/// collapses to the all-done block. Headers and unknown blocks are kept in
/// place; dividers are regenerated in front of every group.
pub fn reduce(blocks: &[MessageBlock], checked: &CheckedSet, date: NaiveDate) -> ReduceOutcome {
    let done = previously_checked(blocks, checked);
    let mut next = Vec::with_capacity(blocks.len());
    let mut remaining = 0;

    for segment in recognize(blocks) {
        match segment {
            Segment::Header(block) | Segment::Passthrough(block) => next.push(block.clone()),
            Segment::Divider => {}
            Segment::Completed(marker) => {
                next.push(MessageBlock::divider());
                next.push(Block::Section(marker.clone()).into());
            }
            Segment::Group { title, options: None } => {
                next.push(MessageBlock::divider());
                next.push(Block::Section(title.clone()).into());
            }
            Segment::Group {
                title,
                options: Some(options),
            } => {
                let kept: Vec<CheckboxOption> = options
                    .checkboxes
                    .options
                    .iter()
                    .filter(|option| !done.contains(&option_text(option)))
                    .cloned()
                    .collect();

                debug!(
                    "{}: {} of {} options left",
                    title.text.text,
                    kept.len(),
                    options.checkboxes.options.len()
                );

                next.push(MessageBlock::divider());
                if kept.is_empty() {
                    next.push(completed_marker(title));
                } else {
                    remaining += kept.len();
                    next.push(Block::Section(title.clone()).into());
                    next.push(rebuilt_actions(options, kept));
                }
            }
        }
    }

    if remaining == 0 {
        return ReduceOutcome {
            blocks: all_done_blocks(date),
            state: ChecklistState::AllDone,
            remaining: 0,
        };
    }

    ReduceOutcome {
        blocks: next,
        state: ChecklistState::HasPending,
        remaining,
    }
}

/// Convenience for callers holding raw checkbox values
pub fn reduce_values<I, S>(blocks: &[MessageBlock], values: I, date: NaiveDate) -> ReduceOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    reduce(blocks, &CheckedSet::from_values(values), date)
}
