//! Notification channel configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named channel declaration
///
/// The `type` tag selects the channel implementation; `config` carries the
/// type-specific string settings (`to`, `template`, `slack_channel`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    #[serde(rename = "type")]
    pub channel_type: String,
    #[serde(default)]
    pub config: HashMap<String, String>,
}

impl ChannelConfig {
    pub fn new(channel_type: impl Into<String>) -> Self {
        Self {
            channel_type: channel_type.into(),
            config: HashMap::new(),
        }
    }

    /// Builder-style setter for a config entry
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.config.get(key).map(String::as_str)
    }
}

/// Settings shared by all channels of one kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelSettings {
    #[serde(default)]
    pub smtp: Option<SmtpSettings>,
    #[serde(default)]
    pub slack: Option<SlackSettings>,
}

/// SMTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpSettings {
    pub server: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Sender address
    pub from: String,
    /// Optional sender display name
    #[serde(default)]
    pub from_name: Option<String>,
    /// Implicit TLS (SMTPS) instead of STARTTLS
    #[serde(default)]
    pub ssl: bool,
    /// Plain, unauthenticated relay (local postfix/sendmail)
    #[serde(default)]
    pub anonymous: bool,
}

/// Slack incoming webhook settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackSettings {
    pub webhook_url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default = "default_icon_emoji")]
    pub icon_emoji: String,
}
