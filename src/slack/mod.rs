pub mod bot;
pub mod client;
pub mod error;
pub mod interaction;

pub use bot::BotContext;
pub use client::{PostedMessage, SLACK_API_BASE, SlackClient};
pub use error::{SlackError, SlackResult};
pub use interaction::{
    BlockActionsPayload, ChecklistUpdate, MessageLocks, apply_checkbox_action,
};
