//! Alerta server configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for the Alerta API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertaConfig {
    /// API base URL, e.g. `https://alerta.example.com/api`
    pub endpoint: String,
    /// Web UI base URL used to build alert links
    pub webui: String,
    /// API key sent as `X-API-Key`
    #[serde(default, alias = "api_token")]
    pub api_key: Option<String>,
    /// Polling interval in seconds
    #[serde(default = "default_reload_interval")]
    pub reload_interval: u64,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl AlertaConfig {
    /// Create a config with default interval and timeout
    pub fn new(endpoint: impl Into<String>, webui: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            webui: webui.into(),
            api_key: None,
            reload_interval: default_reload_interval(),
            timeout: default_timeout(),
        }
    }

    /// Polling interval as a duration
    pub fn reload_interval(&self) -> Duration {
        Duration::from_secs(self.reload_interval)
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
