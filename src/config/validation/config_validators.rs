//! Notifier configuration validators
//!
//! Channel type tags and per-type keys are checked by the channel factory;
//! these validators cover everything that does not need a channel instance.

use super::trait_def::Validate;
use super::url::validate_http_url;
use crate::config::models::*;
use tracing::debug;

impl Validate for NotifierConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating notifier configuration");

        self.alerta.validate()?;

        if let Some(smtp) = &self.channel_settings.smtp {
            smtp.validate()?;
        }
        if let Some(slack) = &self.channel_settings.slack {
            slack.validate()?;
        }

        if self.rules.is_empty() {
            return Err("At least one rule must be configured".to_string());
        }

        for (rule_name, rule) in &self.rules {
            rule.validate()
                .map_err(|e| format!("Rule '{}': {}", rule_name, e))?;

            for channel in &rule.channels {
                if !self.channels.contains_key(channel) {
                    return Err(format!(
                        "Rule '{}' references undeclared channel '{}'",
                        rule_name, channel
                    ));
                }
            }
        }

        debug!("Notifier configuration validation completed");
        Ok(())
    }
}

impl Validate for AlertaConfig {
    fn validate(&self) -> Result<(), String> {
        validate_http_url(&self.endpoint, "Alerta endpoint")?;
        validate_http_url(&self.webui, "Alerta webui")?;

        if self.reload_interval == 0 {
            return Err("Alerta reload_interval must be at least 1 second".to_string());
        }

        if self.timeout == 0 {
            return Err("Alerta timeout must be at least 1 second".to_string());
        }

        // A request must finish before the next tick is due.
        if self.timeout >= self.reload_interval {
            return Err(format!(
                "Alerta timeout ({}s) must be shorter than reload_interval ({}s)",
                self.timeout, self.reload_interval
            ));
        }

        Ok(())
    }
}

impl Validate for RuleConfig {
    fn validate(&self) -> Result<(), String> {
        if self.channels.is_empty() {
            return Err("at least one channel is required".to_string());
        }

        Ok(())
    }
}

impl Validate for SmtpSettings {
    fn validate(&self) -> Result<(), String> {
        if self.server.trim().is_empty() {
            return Err("SMTP server cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("SMTP port must be greater than 0".to_string());
        }

        if self.from.trim().is_empty() {
            return Err("SMTP from address cannot be empty".to_string());
        }

        if !self.anonymous && (self.user.is_none() || self.password.is_none()) {
            return Err(
                "SMTP user and password are required unless anonymous is set".to_string(),
            );
        }

        Ok(())
    }
}

impl Validate for SlackSettings {
    fn validate(&self) -> Result<(), String> {
        validate_http_url(&self.webhook_url, "Slack webhook_url")
    }
}
