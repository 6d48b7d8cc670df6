//! Alert batches handed to channels

use crate::alerta::Alert;
use serde::Serialize;

/// Newly opened alerts for one rule
#[derive(Debug, Clone, Serialize)]
pub struct OpenAlertsEvent {
    pub new_alert_count: usize,
    pub new_alerts: Vec<Alert>,
    /// Alerts still open that were notified on an earlier cycle
    pub already_notified: usize,
}

/// Alerts that disappeared from a rule's open set
#[derive(Debug, Clone, Serialize)]
pub struct ClosedAlertsEvent {
    pub alerts: Vec<Alert>,
}

impl OpenAlertsEvent {
    pub fn new(new_alerts: Vec<Alert>, already_notified: usize) -> Self {
        Self {
            new_alert_count: new_alerts.len(),
            new_alerts,
            already_notified,
        }
    }

    /// `"1 new alert"` / `"3 new alerts"`
    pub fn subject(&self) -> String {
        if self.new_alert_count == 1 {
            "1 new alert".to_string()
        } else {
            format!("{} new alerts", self.new_alert_count)
        }
    }
}

impl ClosedAlertsEvent {
    pub fn new(alerts: Vec<Alert>) -> Self {
        Self { alerts }
    }

    /// `"1 alert closed"` / `"2 alerts closed"`
    pub fn subject(&self) -> String {
        if self.alerts.len() == 1 {
            "1 alert closed".to_string()
        } else {
            format!("{} alerts closed", self.alerts.len())
        }
    }
}
