//! Top-level configuration file model

use super::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The whole configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    pub alerta: AlertaConfig,
    #[serde(default)]
    pub channel_settings: ChannelSettings,
    #[serde(default)]
    pub channels: BTreeMap<String, ChannelConfig>,
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
    /// Log payloads instead of delivering them
    #[serde(default)]
    pub dry_run: bool,
}
