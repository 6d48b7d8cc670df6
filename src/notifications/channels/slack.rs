//! Slack incoming-webhook channel

use super::{ChannelType, NotificationChannel};
use crate::alerta::Alert;
use crate::config::{ChannelConfig, SlackSettings};
use crate::notifications::events::{ClosedAlertsEvent, OpenAlertsEvent};
use crate::utils::error::{NotifierError, Result};
use chrono::Utc;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

const SLACK_TIMEOUT: Duration = Duration::from_secs(10);
const FOOTER: &str = "Alerta Notifications";

/// Webhook payload
#[derive(Debug, Clone, Serialize)]
pub struct WebhookMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub icon_emoji: String,
    pub text: String,
    pub channel: String,
    pub attachments: Vec<Attachment>,
}

/// One alert rendered as a message attachment
#[derive(Debug, Clone, Serialize)]
pub struct Attachment {
    pub color: String,
    pub text: String,
    pub footer: String,
    pub ts: i64,
    pub fields: Vec<AttachmentField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttachmentField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

/// Posts alert batches to one Slack channel
#[derive(Debug)]
pub struct SlackChannel {
    name: String,
    slack_channel: String,
    webhook_url: String,
    username: Option<String>,
    icon_emoji: String,
    client: reqwest::Client,
}

impl SlackChannel {
    pub fn from_config(name: &str, channel: &ChannelConfig, slack: &SlackSettings) -> Result<Self> {
        let slack_channel = channel.get("slack_channel").ok_or_else(|| {
            NotifierError::Config(format!(
                "'slack_channel' property is required for channel '{}' of type 'slack'",
                name
            ))
        })?;

        let client = reqwest::Client::builder()
            .timeout(SLACK_TIMEOUT)
            .build()
            .map_err(|e| NotifierError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            name: name.to_string(),
            slack_channel: slack_channel.to_string(),
            webhook_url: slack.webhook_url.clone(),
            username: slack.username.clone(),
            icon_emoji: slack.icon_emoji.clone(),
            client,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build the webhook payload for a batch of alerts
    ///
    /// Closed alerts are always green; open ones are yellow for `minor` and
    /// red for everything else.
    pub fn message(&self, text: String, alerts: &[Alert], closed: bool) -> WebhookMessage {
        let ts = Utc::now().timestamp();
        let attachments = alerts
            .iter()
            .map(|alert| {
                let color = if closed {
                    "good"
                } else if alert.severity == "minor" {
                    "warning"
                } else {
                    "danger"
                };

                Attachment {
                    color: color.to_string(),
                    text: format!(
                        "*`{}`* - <{}|{}>\n{}",
                        escape_mrkdwn(&alert.event),
                        alert.url,
                        escape_mrkdwn(&alert.resource),
                        escape_mrkdwn(&alert.text)
                    ),
                    footer: FOOTER.to_string(),
                    ts,
                    fields: vec![
                        AttachmentField {
                            title: "Severity".to_string(),
                            value: alert.severity.clone(),
                            short: true,
                        },
                        AttachmentField {
                            title: "Environment".to_string(),
                            value: alert.environment.clone(),
                            short: true,
                        },
                    ],
                }
            })
            .collect();

        WebhookMessage {
            username: self.username.clone(),
            icon_emoji: self.icon_emoji.clone(),
            text,
            channel: self.slack_channel.clone(),
            attachments,
        }
    }

    /// JSON body posted to the webhook
    pub fn payload(&self, message: &WebhookMessage) -> Result<String> {
        Ok(serde_json::to_string(message)?)
    }

    async fn post(&self, message: &WebhookMessage, dry_run: bool) -> Result<()> {
        let payload = self.payload(message)?;

        if dry_run {
            info!("-- DryRun is active: not really sending slack message --");
            info!("{}", payload);
            return Ok(());
        }

        debug!("> [POST] slack webhook for channel '{}'", self.name);
        let response = self
            .client
            .post(&self.webhook_url)
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| NotifierError::Slack(format!("Failed to send Slack notification: {}", e)))?;

        let status = response.status();
        debug!("< {}", status);
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifierError::Slack(format!(
                "Slack webhook returned status {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl NotificationChannel for SlackChannel {
    async fn send_open_alerts(&self, event: &OpenAlertsEvent, dry_run: bool) -> Result<()> {
        let message = self.message(event.subject(), &event.new_alerts, false);
        self.post(&message, dry_run).await
    }

    async fn send_closed_alerts(&self, event: &ClosedAlertsEvent, dry_run: bool) -> Result<()> {
        let message = self.message(event.subject(), &event.alerts, true);
        self.post(&message, dry_run).await
    }

    fn kind(&self) -> ChannelType {
        ChannelType::Slack
    }
}

/// Slack reads `&`, `<` and `>` as control characters in message text
fn escape_mrkdwn(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
