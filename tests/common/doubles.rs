//! Test doubles for the alert source and notification channels

use alerta_notifications::notifications::{
    ChannelType, ClosedAlertsEvent, NotificationChannel, OpenAlertsEvent,
};
use alerta_notifications::{Alert, AlertSource, NotifierError, Result};
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Alert source holding the open set in memory
///
/// Attribute updates are applied to the stored alerts, so later fetches see
/// the ledger the way Alerta would return it.
#[derive(Default)]
pub struct InMemoryAlertSource {
    open: Mutex<Vec<Alert>>,
    updates: Mutex<Vec<(String, String)>>,
    fail_fetch: AtomicBool,
    fail_updates: AtomicBool,
}

impl InMemoryAlertSource {
    pub fn new(open: Vec<Alert>) -> Self {
        Self {
            open: Mutex::new(open),
            ..Default::default()
        }
    }

    pub fn set_open(&self, open: Vec<Alert>) {
        *self.open.lock().unwrap() = open;
    }

    /// Drop the given ids from the open set, keeping stored attributes of the rest
    pub fn close(&self, ids: &[&str]) {
        self.open
            .lock()
            .unwrap()
            .retain(|alert| !ids.contains(&alert.id.as_str()));
    }

    pub fn open(&self) -> Vec<Alert> {
        self.open.lock().unwrap().clone()
    }

    /// `(alert_id, rule_id)` of every update call
    pub fn updates(&self) -> Vec<(String, String)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl AlertSource for InMemoryAlertSource {
    async fn fetch(&self, _filter: &str) -> Result<Vec<Alert>> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(NotifierError::alerta("Alerta unavailable"));
        }
        Ok(self.open())
    }

    async fn update_notification_attribute(
        &self,
        alert_id: &str,
        rule_id: &str,
        notified_at: DateTime<Utc>,
    ) -> Result<()> {
        self.updates
            .lock()
            .unwrap()
            .push((alert_id.to_string(), rule_id.to_string()));

        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(NotifierError::alerta("attribute update rejected"));
        }

        if let Some(alert) = self.open.lock().unwrap().iter_mut().find(|a| a.id == alert_id) {
            alert.mark_notified(rule_id, notified_at);
        }
        Ok(())
    }
}

/// Channel recording every batch it receives
#[derive(Default)]
pub struct RecordingChannel {
    open: Mutex<Vec<OpenAlertsEvent>>,
    closed: Mutex<Vec<ClosedAlertsEvent>>,
    dry_runs: Mutex<Vec<bool>>,
    failing: AtomicBool,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let channel = Self::default();
        channel.failing.store(true, Ordering::SeqCst);
        channel
    }

    pub fn open_events(&self) -> Vec<OpenAlertsEvent> {
        self.open.lock().unwrap().clone()
    }

    pub fn closed_events(&self) -> Vec<ClosedAlertsEvent> {
        self.closed.lock().unwrap().clone()
    }

    pub fn dry_runs(&self) -> Vec<bool> {
        self.dry_runs.lock().unwrap().clone()
    }

    fn outcome(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(NotifierError::channel("delivery failed"))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl NotificationChannel for RecordingChannel {
    async fn send_open_alerts(&self, event: &OpenAlertsEvent, dry_run: bool) -> Result<()> {
        self.open.lock().unwrap().push(event.clone());
        self.dry_runs.lock().unwrap().push(dry_run);
        self.outcome()
    }

    async fn send_closed_alerts(&self, event: &ClosedAlertsEvent, dry_run: bool) -> Result<()> {
        self.closed.lock().unwrap().push(event.clone());
        self.dry_runs.lock().unwrap().push(dry_run);
        self.outcome()
    }

    fn kind(&self) -> ChannelType {
        ChannelType::Slack
    }
}
