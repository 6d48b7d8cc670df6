//! Notification channel implementations

mod mail;
mod slack;

pub use mail::MailChannel;
pub use slack::{Attachment, AttachmentField, SlackChannel, WebhookMessage};

use super::events::{ClosedAlertsEvent, OpenAlertsEvent};
use crate::config::{ChannelConfig, ChannelSettings, Config, RuleConfig};
use crate::utils::error::{NotifierError, Result};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Notification channel trait
///
/// With `dry_run` set, implementations render and marshal the full payload
/// and log it instead of delivering it.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Announce newly opened alerts
    async fn send_open_alerts(&self, event: &OpenAlertsEvent, dry_run: bool) -> Result<()>;

    /// Announce alerts that are no longer open
    async fn send_closed_alerts(&self, event: &ClosedAlertsEvent, dry_run: bool) -> Result<()>;

    /// Channel implementation kind
    fn kind(&self) -> ChannelType;
}

/// Channel type tag as written in the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelType {
    Mail,
    Slack,
}

impl FromStr for ChannelType {
    type Err = NotifierError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mail" => Ok(ChannelType::Mail),
            "slack" => Ok(ChannelType::Slack),
            other => Err(NotifierError::Config(format!(
                "Unknown channel type {}: valid types are mail, slack",
                other
            ))),
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelType::Mail => write!(f, "mail"),
            ChannelType::Slack => write!(f, "slack"),
        }
    }
}

/// Named channels available to rules
///
/// Built once at startup and shared read-only afterwards.
#[derive(Clone, Default)]
pub struct ChannelRegistry {
    channels: HashMap<String, Arc<dyn NotificationChannel>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every declared channel, failing on the first invalid one
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut registry = Self::new();

        for (name, channel) in config.channels() {
            let built = build_channel(name, channel, config.channel_settings())?;
            debug!("Loaded {} channel '{}'", built.kind(), name);
            registry.insert(name.clone(), built);
        }

        Ok(registry)
    }

    pub fn insert(&mut self, name: impl Into<String>, channel: Arc<dyn NotificationChannel>) {
        self.channels.insert(name.into(), channel);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn NotificationChannel>> {
        self.channels.get(name)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Every channel a rule names must exist
    pub fn check_rule_references(&self, rules: &BTreeMap<String, RuleConfig>) -> Result<()> {
        for (rule_name, rule) in rules {
            if let Some(missing) = rule.channels.iter().find(|c| !self.channels.contains_key(*c)) {
                return Err(NotifierError::Config(format!(
                    "Unable to find channel '{}' of rule '{}' in channel config",
                    missing, rule_name
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChannelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.channels.keys().collect();
        names.sort();
        f.debug_struct("ChannelRegistry")
            .field("channels", &names)
            .finish()
    }
}

/// Channel factory keyed by the configured type tag
fn build_channel(
    name: &str,
    channel: &ChannelConfig,
    settings: &ChannelSettings,
) -> Result<Arc<dyn NotificationChannel>> {
    match channel.channel_type.parse::<ChannelType>()? {
        ChannelType::Mail => {
            let smtp = settings.smtp.as_ref().ok_or_else(|| {
                NotifierError::Config(format!(
                    "Channel '{}' of type 'mail' requires channel_settings.smtp",
                    name
                ))
            })?;
            Ok(Arc::new(MailChannel::from_config(name, channel, smtp)?))
        }
        ChannelType::Slack => {
            let slack = settings.slack.as_ref().ok_or_else(|| {
                NotifierError::Config(format!(
                    "Channel '{}' of type 'slack' requires channel_settings.slack",
                    name
                ))
            })?;
            Ok(Arc::new(SlackChannel::from_config(name, channel, slack)?))
        }
    }
}
