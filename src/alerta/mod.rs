//! Alerta alert source
//!
//! The alert source is the only component that talks to the Alerta API. It
//! returns the currently open alerts for a rule's filter and persists the
//! per-rule notification marker back onto each alert.

mod client;
mod ledger;
mod types;

pub use client::AlertaClient;
pub use ledger::{NOTIFICATION_ATTRIBUTE_PREFIX, notification_attribute, notification_timestamp};
pub use types::{Alert, AlertsResponse, severity_color};

use crate::utils::error::Result;
use chrono::{DateTime, Utc};

/// Source of open alerts
#[async_trait::async_trait]
pub trait AlertSource: Send + Sync {
    /// Fetch every alert currently matching `filter`
    async fn fetch(&self, filter: &str) -> Result<Vec<Alert>>;

    /// Record on the alert that `rule_id` has notified about it
    async fn update_notification_attribute(
        &self,
        alert_id: &str,
        rule_id: &str,
        notified_at: DateTime<Utc>,
    ) -> Result<()>;
}
