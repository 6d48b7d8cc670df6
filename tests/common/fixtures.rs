//! Test fixtures and data factories

use alerta_notifications::Alert;
use alerta_notifications::config::Config;
use chrono::Utc;
use uuid::Uuid;

/// Factory for alerts with realistic metadata
pub struct AlertFactory;

impl AlertFactory {
    /// An open major alert with a random id
    pub fn create() -> Alert {
        Self::with_id(&Uuid::new_v4().to_string())
    }

    pub fn with_id(id: &str) -> Alert {
        let mut alert = Alert::new(id);
        alert.environment = "Production".to_string();
        alert.resource = format!("web-{}", &Uuid::new_v4().to_string()[..8]);
        alert.event = "NodeDown".to_string();
        alert.severity = "major".to_string();
        alert.text = "Node is not responding".to_string();
        alert.href = format!("http://alerta.test/api/alert/{}", id);
        alert
    }

    pub fn batch(n: usize) -> Vec<Alert> {
        (0..n).map(|_| Self::create()).collect()
    }

    /// An alert already carrying the marker of `rule_id`
    pub fn notified(id: &str, rule_id: &str) -> Alert {
        let mut alert = Self::with_id(id);
        alert.mark_notified(rule_id, Utc::now());
        alert
    }
}

/// Factory for configuration files
pub struct ConfigFactory;

impl ConfigFactory {
    /// Minimal valid YAML with one slack channel and one rule
    pub fn yaml(endpoint: &str, webhook_url: &str) -> String {
        format!(
            r##"
alerta:
  endpoint: "{endpoint}"
  webui: "http://alerta.test"
  api_key: "test-key"
  reload_interval: 30
  timeout: 5
channel_settings:
  slack:
    webhook_url: "{webhook_url}"
    username: "alerta"
channels:
  ops:
    type: slack
    config:
      slack_channel: "#ops"
rules:
  production:
    filter: "status=open&environment=Production"
    channels: [ops]
"##
        )
    }

    pub fn config(endpoint: &str, webhook_url: &str) -> Config {
        Config::from_yaml(&Self::yaml(endpoint, webhook_url)).unwrap()
    }
}
