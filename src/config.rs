use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::stages::AttributionConfig;

/// Environment variable overriding `slack.bot_token`
pub const BOT_TOKEN_ENV: &str = "SLACK_BOT_TOKEN";
/// Environment variable overriding `slack.channel`
pub const CHANNEL_ENV: &str = "SLACK_CHANNEL";

/// Settings read from the user's config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root of the Obsidian vault; `~` is expanded
    #[serde(default)]
    pub obsidian_vault: Option<PathBuf>,
    #[serde(default = "default_meetings_subfolder")]
    pub meetings_subfolder: String,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default = "default_self_tag")]
    pub self_tag: String,
    #[serde(default)]
    pub slack: SlackSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackSettings {
    #[serde(default)]
    pub bot_token: Option<String>,
    /// Only used by socket-mode deployments; kept so config files round-trip
    #[serde(default)]
    pub app_token: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
}

fn default_meetings_subfolder() -> String {
    "Meetings".to_string()
}

fn default_self_tag() -> String {
    "me".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            obsidian_vault: None,
            meetings_subfolder: default_meetings_subfolder(),
            owner_name: None,
            self_tag: default_self_tag(),
            slack: SlackSettings::default(),
        }
    }
}

/// `~/.config/meeting-sync/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("meeting-sync").join("config.json"))
}

/// Replace a leading `~` with the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: AppConfig =
            serde_json::from_str(json).context("Failed to parse config JSON")?;
        config.obsidian_vault = config.obsidian_vault.as_deref().map(expand_home);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_json(&content).with_context(|| format!("Invalid config file: {:?}", path))
    }

    /// Load from `path` or the default location, then apply environment overrides.
    ///
    /// A missing default file yields the defaults; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overlay non-empty values from `lookup` onto the Slack settings
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(token) = non_empty(BOT_TOKEN_ENV) {
            self.slack.bot_token = Some(token);
        }
        if let Some(channel) = non_empty(CHANNEL_ENV) {
            self.slack.channel = Some(channel);
        }
    }

    /// Directory holding meeting notes, if a vault is configured
    pub fn meetings_dir(&self) -> Option<PathBuf> {
        self.obsidian_vault
            .as_ref()
            .map(|vault| vault.join(&self.meetings_subfolder))
    }

    pub fn attribution(&self) -> AttributionConfig {
        AttributionConfig {
            self_tag: self.self_tag.clone(),
            owner_name: self.owner_name.clone(),
        }
    }
}
