use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::checklist::{CHECKBOX_ACTION_PREFIX, ReduceOutcome, reduce};
use crate::models::{CheckedSet, MessageBlock};

use super::error::{SlackError, SlackResult};

/// The parts of a Slack `block_actions` payload the checklist needs
#[derive(Debug, Clone, Deserialize)]
pub struct BlockActionsPayload {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub channel: ChannelRef,
    pub message: InteractionMessage,
    #[serde(default)]
    pub actions: Vec<PayloadAction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelRef {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionMessage {
    pub ts: String,
    #[serde(default)]
    pub blocks: Vec<MessageBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayloadAction {
    #[serde(default)]
    pub action_id: String,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectedOption {
    pub value: String,
}

impl BlockActionsPayload {
    pub fn from_json(json: &str) -> SlackResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Accepts the raw JSON or a form body carrying `payload=<urlencoded json>`
    pub fn from_body(body: &str) -> SlackResult<Self> {
        let trimmed = body.trim();
        if trimmed.starts_with('{') {
            return Self::from_json(trimmed);
        }
        let encoded = trimmed
            .split('&')
            .find_map(|pair| pair.strip_prefix("payload="))
            .ok_or(SlackError::MissingPayload)?;
        let spaced = encoded.replace('+', " ");
        let json = urlencoding::decode(&spaced)?;
        Self::from_json(&json)
    }

    /// Checkbox actions on this message's checklist
    pub fn checkbox_actions(&self) -> impl Iterator<Item = &PayloadAction> {
        self.actions
            .iter()
            .filter(|a| a.action_id.starts_with(CHECKBOX_ACTION_PREFIX))
    }

    /// Every value ticked across the checkbox actions
    pub fn checked(&self) -> CheckedSet {
        CheckedSet::from_values(
            self.checkbox_actions()
                .flat_map(|a| a.selected_options.iter().map(|o| o.value.as_str())),
        )
    }
}

/// The message edit produced by one checkbox interaction
#[derive(Debug, Clone, PartialEq)]
pub struct ChecklistUpdate {
    pub channel: String,
    pub ts: String,
    pub outcome: ReduceOutcome,
}

impl ChecklistUpdate {
    pub fn text(&self) -> String {
        self.outcome.fallback_text()
    }

    pub fn blocks(&self) -> &[MessageBlock] {
        &self.outcome.blocks
    }
}

/// Reduce the interacted message; `None` when the payload carries no checkbox action
pub fn apply_checkbox_action(payload: &BlockActionsPayload, date: NaiveDate) -> Option<ChecklistUpdate> {
    if payload.checkbox_actions().next().is_none() {
        debug!("Ignoring {} payload without checkbox actions", payload.kind);
        return None;
    }

    let checked = payload.checked();
    let outcome = reduce(&payload.message.blocks, &checked, date);
    debug!(
        "Reduced message {} with {} checked: {} remaining",
        payload.message.ts,
        checked.len(),
        outcome.remaining
    );

    Some(ChecklistUpdate {
        channel: payload.channel.id.clone(),
        ts: payload.message.ts.clone(),
        outcome,
    })
}

/// Serializes interaction handling per message
#[derive(Debug, Default)]
pub struct MessageLocks {
    locks: Mutex<HashMap<(String, String), Arc<Mutex<()>>>>,
}

impl MessageLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to the message at `channel`/`ts`
    pub async fn lock(&self, channel: &str, ts: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Entries nobody holds can be recreated on demand
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks
                .entry((channel.to_string(), ts.to_string()))
                .or_default()
                .clone()
        };
        lock.lock_owned().await
    }

    pub async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}
