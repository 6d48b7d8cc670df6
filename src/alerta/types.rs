//! Alert data structures

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// An alert as returned by the Alerta API
///
/// Only the fields the notifier uses are modelled. `id` is stable across
/// polls and is the sole identity used for closed-alert detection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alert {
    pub id: String,
    pub environment: String,
    pub text: String,
    pub resource: String,
    pub severity: String,
    pub event: String,
    pub href: String,
    #[serde(deserialize_with = "string_attributes")]
    pub attributes: HashMap<String, String>,
    /// Link into the Alerta web UI, filled in by the client
    #[serde(skip_deserializing)]
    pub url: String,
}

/// Response of `GET /alerts`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AlertsResponse {
    pub alerts: Vec<Alert>,
    #[serde(rename = "statusCounts")]
    pub status_counts: HashMap<String, u64>,
}

impl Alert {
    /// Create an alert with the given id and no metadata
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Color used in mail bodies for this alert's severity
    pub fn color(&self) -> &'static str {
        severity_color(&self.severity)
    }
}

/// Mail color of an Alerta severity
pub fn severity_color(severity: &str) -> &'static str {
    match severity {
        "warning" => "#17a2b8",
        "minor" => "#ffc107",
        "major" | "critical" => "#dc3545",
        _ => "#343a40",
    }
}

/// Alerta attributes are free-form JSON; keep strings as-is and render
/// everything else as JSON text. A `null` map deserializes as empty.
fn string_attributes<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<HashMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;

    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(s) => (key, s),
            other => (key, other.to_string()),
        })
        .collect())
}
