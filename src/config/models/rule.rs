//! Rule configuration

use serde::{Deserialize, Serialize};

/// A rule: an Alerta query plus the channels to notify
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Query string appended to `/alerts?`, passed through untouched
    pub filter: String,
    /// Channel names, notified in this order
    #[serde(default)]
    pub channels: Vec<String>,
}

impl RuleConfig {
    pub fn new(filter: impl Into<String>, channels: &[&str]) -> Self {
        Self {
            filter: filter.into(),
            channels: channels.iter().map(|c| c.to_string()).collect(),
        }
    }
}
