//! SMTP mail channel

use super::{ChannelType, NotificationChannel};
use crate::config::{ChannelConfig, SmtpSettings};
use crate::notifications::events::{ClosedAlertsEvent, OpenAlertsEvent};
use crate::notifications::render::MailTemplates;
use crate::utils::error::{NotifierError, Result};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends HTML mails to a fixed recipient list
pub struct MailChannel {
    name: String,
    from: Mailbox,
    recipients: Vec<Mailbox>,
    templates: MailTemplates,
    custom_template: bool,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl MailChannel {
    /// Build a mail channel from its declaration and the shared SMTP settings
    ///
    /// The optional `template` file is read and compiled here, so a missing
    /// or malformed template fails at startup rather than on the first alert.
    pub fn from_config(name: &str, channel: &ChannelConfig, smtp: &SmtpSettings) -> Result<Self> {
        let to = channel.get("to").ok_or_else(|| {
            NotifierError::Config(format!(
                "'to' property is required for channel '{}' of type 'mail'",
                name
            ))
        })?;
        let recipients = parse_recipients(name, to)?;

        let custom = match channel.get("template") {
            Some(path) => Some(load_template(name, path)?),
            None => None,
        };
        let templates = MailTemplates::new(custom.as_deref()).map_err(|e| match e {
            NotifierError::Config(msg) => {
                NotifierError::Config(format!("{} (channel '{}')", msg, name))
            }
            other => other,
        })?;

        let address: Address = smtp.from.parse().map_err(|e| {
            NotifierError::Config(format!("Invalid smtp sender '{}': {}", smtp.from, e))
        })?;
        let from = Mailbox::new(smtp.from_name.clone(), address);

        Ok(Self {
            name: name.to_string(),
            from,
            recipients,
            templates,
            custom_template: custom.is_some(),
            transport: build_transport(smtp)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn recipients(&self) -> &[Mailbox] {
        &self.recipients
    }

    /// Mail announcing newly opened alerts
    pub fn open_message(&self, event: &OpenAlertsEvent) -> Result<Message> {
        let body = self.templates.render_open(event)?;
        self.build_message(event.subject(), body)
    }

    /// Mail announcing closed alerts
    pub fn closed_message(&self, event: &ClosedAlertsEvent) -> Result<Message> {
        let body = self.templates.render_closed(event)?;
        self.build_message(event.subject(), body)
    }

    fn build_message(&self, subject: String, body: String) -> Result<Message> {
        let mut builder = Message::builder().from(self.from.clone());
        for recipient in &self.recipients {
            builder = builder.to(recipient.clone());
        }

        Ok(builder
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body)?)
    }

    async fn deliver(&self, message: Message, dry_run: bool) -> Result<()> {
        if dry_run {
            info!("-- DryRun is active: not really sending mail --");
            info!("{}", preview(&message));
            return Ok(());
        }

        debug!(
            "Sending mail via channel '{}' to {} recipient(s)",
            self.name,
            self.recipients.len()
        );
        self.transport.send(message).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl NotificationChannel for MailChannel {
    async fn send_open_alerts(&self, event: &OpenAlertsEvent, dry_run: bool) -> Result<()> {
        let message = self.open_message(event)?;
        self.deliver(message, dry_run).await
    }

    async fn send_closed_alerts(&self, event: &ClosedAlertsEvent, dry_run: bool) -> Result<()> {
        let message = self.closed_message(event)?;
        self.deliver(message, dry_run).await
    }

    fn kind(&self) -> ChannelType {
        ChannelType::Mail
    }
}

impl fmt::Debug for MailChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailChannel")
            .field("name", &self.name)
            .field("from", &self.from.to_string())
            .field("recipients", &self.recipients.len())
            .field("custom_template", &self.custom_template)
            .finish()
    }
}

/// The message as it would go over the wire, for dry-run logs
pub fn preview(message: &Message) -> String {
    String::from_utf8_lossy(&message.formatted()).into_owned()
}

fn parse_recipients(name: &str, to: &str) -> Result<Vec<Mailbox>> {
    let recipients = to
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(|r| {
            r.parse::<Mailbox>().map_err(|e| {
                NotifierError::Config(format!(
                    "Invalid recipient '{}' for channel '{}': {}",
                    r, name, e
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if recipients.is_empty() {
        return Err(NotifierError::Config(format!(
            "'to' property of channel '{}' lists no recipients",
            name
        )));
    }
    Ok(recipients)
}

fn load_template(name: &str, path: &str) -> Result<String> {
    std::fs::read_to_string(Path::new(path)).map_err(|e| {
        NotifierError::Config(format!(
            "Unable to read template '{}' of channel '{}': {}",
            path, name, e
        ))
    })
}

fn build_transport(smtp: &SmtpSettings) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
    let builder = if smtp.anonymous {
        AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp.server)
    } else {
        let builder = if smtp.ssl {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.server)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.server)
        }
        .map_err(|e| NotifierError::Config(format!("Failed to create SMTP transport: {}", e)))?;

        let user = smtp.user.clone().unwrap_or_default();
        let password = smtp.password.clone().unwrap_or_default();
        builder.credentials(Credentials::new(user, password))
    };

    Ok(builder
        .port(smtp.port)
        .timeout(Some(SMTP_TIMEOUT))
        .build())
}
