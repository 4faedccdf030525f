use thiserror::Error;

pub type SlackResult<T> = Result<T, SlackError>;

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Slack HTTP error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Slack API error in {method}: {code}")]
    Api { method: &'static str, code: String },

    #[error("Missing Slack configuration: {0}")]
    MissingConfig(&'static str),

    #[error("Invalid interaction payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("Form body has no payload field")]
    MissingPayload,

    #[error("Invalid payload encoding: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),
}

impl SlackError {
    /// Rate limits and server-side failures are worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Api { code, .. } => code == "ratelimited",
            Self::MissingConfig(_)
            | Self::InvalidPayload(_)
            | Self::MissingPayload
            | Self::InvalidEncoding(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(SlackError::Status { status: 503, body: String::new() }.is_retryable());
        assert!(!SlackError::Status { status: 400, body: String::new() }.is_retryable());
        assert!(
            SlackError::Api { method: "chat.update", code: "ratelimited".to_string() }.is_retryable()
        );
        assert!(!SlackError::MissingConfig("slack.channel").is_retryable());
    }

    #[test]
    fn test_messages() {
        let err = SlackError::Api { method: "chat.postMessage", code: "channel_not_found".to_string() };
        assert_eq!(err.to_string(), "Slack API error in chat.postMessage: channel_not_found");
    }
}
