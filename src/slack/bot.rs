use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::io::{find_meetings_for_date, read_meeting_files};
use crate::models::MeetingActionGroup;
use crate::stages::{
    ActionItemExtractor, OwnerMatcher, Partition, RenderedChecklist, partition_by_owner,
    render_checklist, render_summary,
};

use super::client::{PostedMessage, SlackClient};
use super::error::SlackError;
use super::interaction::{BlockActionsPayload, ChecklistUpdate, MessageLocks, apply_checkbox_action};

/// Everything a checklist run needs, built once and shared by reference
pub struct BotContext {
    pub config: AppConfig,
    pub extractor: ActionItemExtractor,
    pub matcher: OwnerMatcher,
    pub locks: MessageLocks,
    client: Option<SlackClient>,
}

impl BotContext {
    /// A context that can read meetings; Slack calls fail until a client is set
    pub fn offline(config: AppConfig) -> Result<Self> {
        let matcher = OwnerMatcher::new(&config.attribution()).context("Invalid owner name")?;
        let extractor = ActionItemExtractor::default();
        debug!(
            "Classifier loaded with {} rules",
            extractor.classifier().rules().len()
        );
        Ok(Self {
            config,
            extractor,
            matcher,
            locks: MessageLocks::new(),
            client: None,
        })
    }

    /// A context talking to Slack with the configured bot token
    pub fn connect(config: AppConfig) -> Result<Self> {
        let client = SlackClient::from_settings(&config.slack)?;
        Ok(Self::offline(config)?.with_client(client))
    }

    pub fn with_client(mut self, client: SlackClient) -> Self {
        self.client = Some(client);
        self
    }

    fn client(&self) -> Result<&SlackClient, SlackError> {
        self.client
            .as_ref()
            .ok_or(SlackError::MissingConfig("slack.bot_token"))
    }

    fn channel(&self) -> Result<&str, SlackError> {
        self.config
            .slack
            .channel
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or(SlackError::MissingConfig("slack.channel"))
    }

    /// Meeting files for `date` in the configured vault
    pub fn meeting_files(&self, date: NaiveDate) -> Result<Vec<PathBuf>> {
        let dir = self
            .config
            .meetings_dir()
            .context("obsidian_vault is not configured")?;
        find_meetings_for_date(&dir, date)
    }

    /// Extract every non-empty meeting group from `paths`
    pub fn extract(&self, paths: &[PathBuf]) -> Result<Vec<MeetingActionGroup>> {
        let records = read_meeting_files(paths)?;
        Ok(self.extractor.extract_all(&records))
    }

    pub fn partition(&self, groups: &[MeetingActionGroup]) -> Partition {
        partition_by_owner(groups, &self.matcher)
    }

    pub fn checklist_for(&self, paths: &[PathBuf], date: NaiveDate) -> Result<RenderedChecklist> {
        let groups = self.extract(paths)?;
        Ok(render_checklist(&self.partition(&groups), date))
    }

    /// Post the interactive checklist for `date`
    pub async fn send_checklist(&self, date: NaiveDate) -> Result<PostedMessage> {
        let paths = self.meeting_files(date)?;
        if paths.is_empty() {
            warn!("No meeting files for {}", date);
        }
        let rendered = self.checklist_for(&paths, date)?;
        self.post(&rendered).await
    }

    /// Post the non-interactive summary for `date`
    pub async fn post_summary(&self, date: NaiveDate) -> Result<PostedMessage> {
        let paths = self.meeting_files(date)?;
        let groups = self.extract(&paths)?;
        self.post(&render_summary(&groups, date)).await
    }

    pub async fn post(&self, rendered: &RenderedChecklist) -> Result<PostedMessage> {
        let channel = self.channel()?;
        let posted = self
            .client()?
            .post_message(channel, &rendered.text, &rendered.blocks)
            .await
            .inspect_err(log_retryable)
            .context("Failed to post message to Slack")?;
        Ok(posted)
    }

    /// Apply a checkbox interaction and edit the message in place.
    ///
    /// Handling is serialized per message, so two clicks on one checklist
    /// are reduced one after the other.
    pub async fn handle_interaction(
        &self,
        payload: &BlockActionsPayload,
        date: NaiveDate,
    ) -> Result<Option<ChecklistUpdate>> {
        let _guard = self.locks.lock(&payload.channel.id, &payload.message.ts).await;

        let Some(update) = apply_checkbox_action(payload, date) else {
            return Ok(None);
        };

        self.client()?
            .update_message(&update.channel, &update.ts, &update.text(), update.blocks())
            .await
            .inspect_err(log_retryable)
            .context("Failed to update checklist message")?;
        info!(
            "Checklist {} updated: {}",
            update.ts,
            update.text()
        );
        Ok(Some(update))
    }
}

fn log_retryable(err: &SlackError) {
    if err.is_retryable() {
        warn!("Slack call failed but may succeed on retry: {}", err);
    }
}
