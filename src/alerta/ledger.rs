//! Per-rule notification marker stored in alert attributes
//!
//! The presence of `notifications <rule>` in an alert's attributes means the
//! rule has already sent a notification for it. The marker lives on the
//! Alerta record, so it must be written back through the alert source to
//! survive a restart.

use super::types::Alert;
use chrono::{DateTime, SecondsFormat, Utc};

/// Attribute key prefix; the rule name follows after a space
pub const NOTIFICATION_ATTRIBUTE_PREFIX: &str = "notifications";

/// Attribute key recording that `rule_id` has notified
pub fn notification_attribute(rule_id: &str) -> String {
    format!("{} {}", NOTIFICATION_ATTRIBUTE_PREFIX, rule_id)
}

/// Attribute value stored under the marker key
pub fn notification_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl Alert {
    /// Whether `rule_id` has already notified about this alert
    pub fn already_notified(&self, rule_id: &str) -> bool {
        self.attributes
            .contains_key(&notification_attribute(rule_id))
    }

    /// Set the marker for `rule_id` on this copy of the alert
    pub fn mark_notified(&mut self, rule_id: &str, at: DateTime<Utc>) {
        self.attributes
            .insert(notification_attribute(rule_id), notification_timestamp(at));
    }
}
