//! Fan-out of alert batches to a rule's channels

use super::channels::{ChannelRegistry, NotificationChannel};
use super::events::{ClosedAlertsEvent, OpenAlertsEvent};
use crate::alerta::Alert;
use crate::utils::error::{NotifierError, Result};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of sending one batch to one channel
#[derive(Debug)]
pub struct DispatchOutcome {
    pub channel: String,
    pub result: Result<()>,
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Sends open and closed batches to named channels
///
/// Sends to different channels run concurrently and never affect each other.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ChannelRegistry>,
    dry_run: bool,
}

impl Dispatcher {
    pub fn new(registry: Arc<ChannelRegistry>, dry_run: bool) -> Self {
        Self { registry, dry_run }
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Announce newly opened alerts to every channel
    pub async fn dispatch_open(
        &self,
        rule_id: &str,
        newly_open: &[Alert],
        already_notified: usize,
        channel_names: &[String],
    ) -> Vec<DispatchOutcome> {
        if newly_open.is_empty() {
            return Vec::new();
        }

        let event = OpenAlertsEvent::new(newly_open.to_vec(), already_notified);
        let dry_run = self.dry_run;
        let event = &event;
        let outcomes = self
            .fan_out(channel_names, |channel| async move {
                channel.send_open_alerts(event, dry_run).await
            })
            .await;

        log_outcomes(rule_id, "open", &outcomes);
        outcomes
    }

    /// Announce alerts that left the open set
    pub async fn dispatch_closed(
        &self,
        rule_id: &str,
        closed: &[Alert],
        channel_names: &[String],
    ) -> Vec<DispatchOutcome> {
        if closed.is_empty() {
            return Vec::new();
        }

        let event = ClosedAlertsEvent::new(closed.to_vec());
        let dry_run = self.dry_run;
        let event = &event;
        let outcomes = self
            .fan_out(channel_names, |channel| async move {
                channel.send_closed_alerts(event, dry_run).await
            })
            .await;

        log_outcomes(rule_id, "closed", &outcomes);
        outcomes
    }

    async fn fan_out<'a, F, Fut>(&'a self, channel_names: &'a [String], send: F) -> Vec<DispatchOutcome>
    where
        F: Fn(Arc<dyn NotificationChannel>) -> Fut,
        Fut: std::future::Future<Output = Result<()>> + 'a,
    {
        let sends = channel_names.iter().map(|name| {
            let channel = self.registry.get(name).cloned();
            let fut = channel.map(&send);
            async move {
                let result = match fut {
                    Some(fut) => fut.await,
                    None => Err(NotifierError::Channel(format!(
                        "Unknown channel '{}'",
                        name
                    ))),
                };
                DispatchOutcome {
                    channel: name.clone(),
                    result,
                }
            }
        });

        join_all(sends).await
    }
}

fn log_outcomes(rule_id: &str, kind: &str, outcomes: &[DispatchOutcome]) {
    for outcome in outcomes {
        match &outcome.result {
            Ok(()) => debug!(
                "Rule '{}': {} alerts sent to channel '{}'",
                rule_id, kind, outcome.channel
            ),
            Err(e) => warn!(
                "Rule '{}': failed to send {} alerts to channel '{}': {}",
                rule_id, kind, outcome.channel, e
            ),
        }
    }
}
