use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::checklist::{
    ACTIONS_BLOCK_PREFIX, CHECKBOX_ACTION_PREFIX, TITLE_BLOCK_PREFIX, format_date,
};
use crate::models::{
    CheckboxOption, MeetingActionGroup, MessageBlock, OptionValue, TextObject, total_items,
};

use super::stage2_partition::Partition;

/// Message ready to post: Block Kit blocks plus the notification fallback text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedChecklist {
    pub blocks: Vec<MessageBlock>,
    pub text: String,
}

/// Build the interactive checklist, owner items first.
///
/// Group indexes run across owner groups then other groups, so the same
/// meeting split across both sections gets two indexes.
pub fn render_checklist(partition: &Partition, date: NaiveDate) -> RenderedChecklist {
    let total = total_items(&partition.owner) + total_items(&partition.other);
    if total == 0 {
        return RenderedChecklist {
            blocks: no_items_blocks(date),
            text: "No action items today.".to_string(),
        };
    }

    let mut blocks = vec![
        MessageBlock::header(format!("Action Items \u{2014} {}", format_date(date))),
        MessageBlock::divider(),
    ];

    let mut group_index = 0;
    if !partition.owner.is_empty() {
        blocks.push(MessageBlock::section("*Your action items:*"));
        for group in &partition.owner {
            push_group(&mut blocks, group, group_index);
            group_index += 1;
        }
    }
    if !partition.other.is_empty() {
        if !partition.owner.is_empty() {
            blocks.push(MessageBlock::divider());
            blocks.push(MessageBlock::section("*Other action items:*"));
        }
        for group in &partition.other {
            push_group(&mut blocks, group, group_index);
            group_index += 1;
        }
    }

    let meetings = partition.meetings;
    info!(
        "Rendered checklist: {} items from {} meetings in {} groups",
        total,
        meetings,
        partition.owner.len() + partition.other.len()
    );

    RenderedChecklist {
        blocks,
        text: format!("{} action item(s) from {} meeting(s)", total, meetings),
    }
}

fn push_group(blocks: &mut Vec<MessageBlock>, group: &MeetingActionGroup, group_index: usize) {
    blocks.push(MessageBlock::section_with_id(
        format!("{TITLE_BLOCK_PREFIX}{group_index}"),
        format!("*{}*", group.title),
    ));

    let options: Vec<CheckboxOption> = group
        .items
        .iter()
        .enumerate()
        .map(|(item_index, item)| {
            let display = item.display();
            CheckboxOption {
                value: OptionValue::new(group_index, item_index, display.clone()).encode(),
                text: TextObject::mrkdwn(display),
            }
        })
        .collect();

    if !options.is_empty() {
        blocks.push(MessageBlock::checkboxes(
            format!("{ACTIONS_BLOCK_PREFIX}{group_index}"),
            format!("{CHECKBOX_ACTION_PREFIX}{group_index}"),
            options,
        ));
    }
    blocks.push(MessageBlock::divider());
}

/// Single block shown when no meeting produced an item
pub fn no_items_blocks(date: NaiveDate) -> Vec<MessageBlock> {
    vec![MessageBlock::section(format!(
        "No action items from meetings today ({}).",
        format_date(date)
    ))]
}

/// Non-interactive daily summary: one bulleted section per meeting
pub fn render_summary(groups: &[MeetingActionGroup], date: NaiveDate) -> RenderedChecklist {
    if groups.is_empty() {
        return RenderedChecklist {
            blocks: Vec::new(),
            text: format!("No action items from meetings today ({}).", format_date(date)),
        };
    }

    let mut blocks = vec![
        MessageBlock::header(format!("Meeting Action Items \u{2014} {}", format_date(date))),
        MessageBlock::divider(),
    ];
    for group in groups {
        blocks.push(MessageBlock::section(format!("*{}*", group.title)));
        let bullets: Vec<String> = group
            .items
            .iter()
            .map(|item| format!("\u{2022} {}", item.display()))
            .collect();
        blocks.push(MessageBlock::section(bullets.join("\n")));
        blocks.push(MessageBlock::divider());
    }

    RenderedChecklist {
        blocks,
        text: format!(
            "{} action item(s) from {} meeting(s) today",
            total_items(groups),
            groups.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActionItem, Block, CheckedValue, Element, Speaker};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn group(title: &str, items: &[(&str, &str)]) -> MeetingActionGroup {
        MeetingActionGroup::new(
            title,
            items
                .iter()
                .map(|(s, t)| ActionItem::new(Speaker::from_label(s), *t))
                .collect(),
        )
    }

    fn option_values(blocks: &[MessageBlock]) -> Vec<String> {
        blocks
            .iter()
            .filter_map(|b| match b {
                MessageBlock::Block(Block::Actions(a)) => Some(a),
                _ => None,
            })
            .flat_map(|a| a.elements.iter())
            .flat_map(|Element::Checkboxes(g)| g.options.iter().map(|o| o.value.clone()))
            .collect()
    }

    fn block_ids(blocks: &[MessageBlock]) -> Vec<String> {
        blocks
            .iter()
            .map(|b| match b {
                MessageBlock::Block(Block::Header(_)) => "header".to_string(),
                MessageBlock::Block(Block::Divider(_)) => "divider".to_string(),
                MessageBlock::Block(Block::Section(s)) => {
                    s.block_id.clone().unwrap_or_else(|| s.text.text.clone())
                }
                MessageBlock::Block(Block::Actions(a)) => a.block_id.clone().unwrap_or_default(),
                MessageBlock::Unrecognized(_) => "raw".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_render_owner_then_other() {
        let partition = Partition {
            owner: vec![group("Standup", &[("me", "I'll send the notes")])],
            other: vec![
                group("Standup", &[("them", "can you check the build")]),
                group("Vendor", &[("them", "we need to negotiate the rate"), ("them", "follow up with legal")]),
            ],
            meetings: 2,
        };

        let rendered = render_checklist(&partition, date());
        assert_eq!(rendered.text, "4 action item(s) from 2 meeting(s)");
        assert_eq!(
            block_ids(&rendered.blocks),
            vec![
                "header",
                "divider",
                "*Your action items:*",
                "meeting_title_0",
                "meeting_actions_0",
                "divider",
                "divider",
                "*Other action items:*",
                "meeting_title_1",
                "meeting_actions_1",
                "divider",
                "meeting_title_2",
                "meeting_actions_2",
                "divider",
            ]
        );

        let MessageBlock::Block(Block::Header(header)) = &rendered.blocks[0] else {
            panic!("expected header");
        };
        assert_eq!(header.text.text, "Action Items \u{2014} October 14, 2026");

        let MessageBlock::Block(Block::Actions(actions)) = &rendered.blocks[12] else {
            panic!("expected actions");
        };
        let Element::Checkboxes(checkboxes) = &actions.elements[0];
        assert_eq!(checkboxes.action_id, "done_checkbox_2");
        assert_eq!(checkboxes.options.len(), 2);
        assert_eq!(checkboxes.options[1].text.text, "(them) follow up with legal");
        assert_eq!(
            CheckedValue::parse(&checkboxes.options[1].value),
            CheckedValue::Encoded(OptionValue::new(2, 1, "(them) follow up with legal"))
        );
    }

    #[test]
    fn test_other_only_has_no_section_labels() {
        let partition = Partition {
            owner: vec![],
            other: vec![group("Vendor", &[("them", "can you send the invoice")])],
            meetings: 1,
        };
        let rendered = render_checklist(&partition, date());
        assert_eq!(
            block_ids(&rendered.blocks),
            vec!["header", "divider", "meeting_title_0", "meeting_actions_0", "divider"]
        );
    }

    #[test]
    fn test_option_values_round_trip_text() {
        let partition = Partition {
            owner: vec![group("A", &[("me", "I'll send \"quotes\" and \\ slashes \u{2014} ok")])],
            other: vec![group("B", &[("them", "can you email the *bold* folks")])],
            meetings: 2,
        };
        let rendered = render_checklist(&partition, date());
        let texts: Vec<String> = option_values(&rendered.blocks)
            .iter()
            .map(|v| CheckedValue::parse(v).into_text())
            .collect();
        assert_eq!(
            texts,
            vec![
                "(me) I'll send \"quotes\" and \\ slashes \u{2014} ok",
                "(them) can you email the *bold* folks"
            ]
        );
    }

    #[test]
    fn test_no_items() {
        let rendered = render_checklist(&Partition::default(), date());
        assert_eq!(rendered.blocks.len(), 1);
        assert_eq!(
            rendered.blocks[0].section_text(),
            Some("No action items from meetings today (October 14, 2026).")
        );
    }

    #[test]
    fn test_split_meeting_counts_once() {
        use crate::stages::{AttributionConfig, OwnerMatcher, partition_by_owner};

        let groups = vec![group("Standup", &[("me", "I'll send the notes"), ("them", "can you check the build")])];
        let matcher = OwnerMatcher::new(&AttributionConfig::default()).unwrap();
        let partition = partition_by_owner(&groups, &matcher);
        assert_eq!(partition.owner.len(), 1);
        assert_eq!(partition.other.len(), 1);

        let rendered = render_checklist(&partition, date());
        assert_eq!(rendered.text, "2 action item(s) from 1 meeting(s)");
    }

    #[test]
    fn test_render_summary() {
        let groups = vec![group("Standup", &[("me", "I'll send it"), ("them", "can you check")])];
        let rendered = render_summary(&groups, date());
        assert_eq!(rendered.text, "2 action item(s) from 1 meeting(s) today");
        assert_eq!(rendered.blocks.len(), 5);
        assert_eq!(rendered.blocks[2].section_text(), Some("*Standup*"));
        assert_eq!(
            rendered.blocks[3].section_text(),
            Some("\u{2022} (me) I'll send it\n\u{2022} (them) can you check")
        );

        let empty = render_summary(&[], date());
        assert!(empty.blocks.is_empty());
        assert_eq!(empty.text, "No action items from meetings today (October 14, 2026).");
    }
}
