//! Configuration management for the notifier
//!
//! This module handles loading and validation of the YAML configuration file.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{NotifierError, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the notifier
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed configuration file
    pub notifier: NotifierConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            NotifierError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let notifier: NotifierConfig = serde_yaml::from_str(content)
            .map_err(|e| NotifierError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { notifier };
        config.validate()?;
        Ok(config)
    }

    /// Get Alerta configuration
    pub fn alerta(&self) -> &AlertaConfig {
        &self.notifier.alerta
    }

    /// Get shared channel settings
    pub fn channel_settings(&self) -> &ChannelSettings {
        &self.notifier.channel_settings
    }

    /// Get declared channels
    pub fn channels(&self) -> &BTreeMap<String, ChannelConfig> {
        &self.notifier.channels
    }

    /// Get configured rules
    pub fn rules(&self) -> &BTreeMap<String, RuleConfig> {
        &self.notifier.rules
    }

    /// Whether the file asks for dry-run mode
    pub fn dry_run(&self) -> bool {
        self.notifier.dry_run
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        self.notifier
            .validate()
            .map_err(NotifierError::Config)
    }
}
