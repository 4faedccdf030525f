use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SlackSettings;
use crate::models::MessageBlock;

use super::error::{SlackError, SlackResult};

pub const SLACK_API_BASE: &str = "https://slack.com/api";

/// Where a posted or updated message lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub channel: String,
    pub ts: String,
}

#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    channel: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ts: Option<&'a str>,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    blocks: Option<&'a [MessageBlock]>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    ts: Option<String>,
}

/// Minimal Slack Web API client for posting and editing messages
pub struct SlackClient {
    client: Client,
    token: String,
    base_url: String,
}

impl SlackClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, SLACK_API_BASE)
    }

    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &SlackSettings) -> SlackResult<Self> {
        let token = settings
            .bot_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(SlackError::MissingConfig("slack.bot_token"))?;
        Ok(Self::new(token))
    }

    /// `chat.postMessage`; an empty block list posts plain text
    pub async fn post_message(
        &self,
        channel: &str,
        text: &str,
        blocks: &[MessageBlock],
    ) -> SlackResult<PostedMessage> {
        let request = MessageRequest {
            channel,
            ts: None,
            text,
            blocks: (!blocks.is_empty()).then_some(blocks),
        };
        let posted = self.call("chat.postMessage", &request, channel).await?;
        info!("Posted message {} to {}", posted.ts, posted.channel);
        Ok(posted)
    }

    /// `chat.update` replacing the message's text and blocks
    pub async fn update_message(
        &self,
        channel: &str,
        ts: &str,
        text: &str,
        blocks: &[MessageBlock],
    ) -> SlackResult<PostedMessage> {
        let request = MessageRequest {
            channel,
            ts: Some(ts),
            text,
            blocks: Some(blocks),
        };
        let updated = self.call("chat.update", &request, channel).await?;
        debug!("Updated message {} in {}", updated.ts, updated.channel);
        Ok(updated)
    }

    async fn call(
        &self,
        method: &'static str,
        request: &MessageRequest<'_>,
        channel: &str,
    ) -> SlackResult<PostedMessage> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, method))
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SlackError::Status { status, body });
        }

        let response: ApiResponse = response.json().await?;
        if !response.ok {
            return Err(SlackError::Api {
                method,
                code: response.error.unwrap_or_else(|| "unknown_error".to_string()),
            });
        }

        Ok(PostedMessage {
            channel: response.channel.unwrap_or_else(|| channel.to_string()),
            ts: response.ts.or(request.ts.map(str::to_string)).unwrap_or_default(),
        })
    }
}
