pub mod recognize;
pub mod reduce;

pub use recognize::*;
pub use reduce::*;

use chrono::NaiveDate;

use crate::models::MessageBlock;

/// `block_id` prefix of a group's title section
pub const TITLE_BLOCK_PREFIX: &str = "meeting_title_";
/// `block_id` prefix of a group's checkbox actions block
pub const ACTIONS_BLOCK_PREFIX: &str = "meeting_actions_";
/// `block_id` prefix of the marker left when a group is fully checked
pub const DONE_BLOCK_PREFIX: &str = "meeting_done_";
/// `action_id` prefix of a group's checkbox element
pub const CHECKBOX_ACTION_PREFIX: &str = "done_checkbox_";

/// Date as shown in checklist headers, e.g. "October 14, 2026"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// The two states a rendered checklist can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistState {
    HasPending,
    AllDone,
}

/// Blocks shown once every item has been checked
pub fn all_done_blocks(date: NaiveDate) -> Vec<MessageBlock> {
    vec![MessageBlock::section(format!(
        "*All action items completed* \u{2014} {} :white_check_mark:",
        format_date(date)
    ))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(format_date(date), "March 05, 2026");
    }

    #[test]
    fn test_all_done_blocks() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        let blocks = all_done_blocks(date);
        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0].section_text(),
            Some("*All action items completed* \u{2014} March 05, 2026 :white_check_mark:")
        );
    }
}
