//! One rule's polling cycle

use super::classifier::classify;
use super::state::RuleState;
use crate::alerta::{Alert, AlertSource};
use crate::config::RuleConfig;
use crate::notifications::{DispatchOutcome, Dispatcher};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Counters describing one evaluated cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Alerts returned by the fetch, `None` when the fetch failed
    pub fetched: Option<usize>,
    pub newly_open: usize,
    pub already_notified: usize,
    pub closed: usize,
    pub failed_sends: usize,
    pub failed_ledger_updates: usize,
}

impl CycleReport {
    pub fn fetch_failed(&self) -> bool {
        self.fetched.is_none()
    }
}

/// Evaluates one rule and owns its rolling state
pub struct RuleHandler {
    name: String,
    rule: RuleConfig,
    source: Arc<dyn AlertSource>,
    dispatcher: Dispatcher,
    state: RuleState,
}

impl RuleHandler {
    pub fn new(
        name: impl Into<String>,
        rule: RuleConfig,
        source: Arc<dyn AlertSource>,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            name: name.into(),
            rule,
            source,
            dispatcher,
            state: RuleState::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> &RuleConfig {
        &self.rule
    }

    pub fn state(&self) -> &RuleState {
        &self.state
    }

    /// Run one cycle: fetch, classify, notify, persist the ledger, remember
    ///
    /// A failed fetch leaves the state untouched. Channel and ledger
    /// failures are logged and counted but never stop the cycle.
    pub async fn evaluate(&mut self) -> CycleReport {
        debug!("Evaluating rule {}", self.name);

        let mut current = match self.source.fetch(&self.rule.filter).await {
            Ok(alerts) => alerts,
            Err(e) => {
                warn!("Unable to fetch alerts for rule {}: {}", self.name, e);
                return CycleReport::default();
            }
        };

        let classification = classify(&current, self.state.previous_open(), &self.name);
        let mut report = CycleReport {
            fetched: Some(current.len()),
            newly_open: classification.newly_open.len(),
            already_notified: classification.already_notified.len(),
            closed: classification.closed.len(),
            ..CycleReport::default()
        };

        if current.is_empty() {
            debug!("No alerts found for rule {}", self.name);
        }

        if !classification.newly_open.is_empty() {
            info!(
                "Sending {} alert(s) to {} channel(s) of rule {}",
                report.newly_open,
                self.rule.channels.len(),
                self.name
            );
            let outcomes = self
                .dispatcher
                .dispatch_open(
                    &self.name,
                    &classification.newly_open,
                    report.already_notified,
                    &self.rule.channels,
                )
                .await;
            report.failed_sends += count_failures(&outcomes);

            let marked = self.persist_ledger(&classification.newly_open, &mut report).await;
            for alert in current.iter_mut().filter(|a| marked.contains(&a.id)) {
                alert.mark_notified(&self.name, Utc::now());
            }
        }
        debug!(
            "{} alerts were already notified for rule {}",
            report.already_notified, self.name
        );

        if !classification.closed.is_empty() {
            info!("{} alerts were closed for rule {}", report.closed, self.name);
            let outcomes = self
                .dispatcher
                .dispatch_closed(&self.name, &classification.closed, &self.rule.channels)
                .await;
            report.failed_sends += count_failures(&outcomes);
        }

        self.state.advance(current);
        debug!(
            "Tracking {} open alerts for rule {}",
            self.state.tracked(),
            self.name
        );

        report
    }

    /// Write the rule's marker back to the source, one call per alert
    async fn persist_ledger(&self, alerts: &[Alert], report: &mut CycleReport) -> HashSet<String> {
        let mut marked = HashSet::new();

        for alert in alerts {
            let notified_at = Utc::now();
            match self
                .source
                .update_notification_attribute(&alert.id, &self.name, notified_at)
                .await
            {
                Ok(()) => {
                    marked.insert(alert.id.clone());
                }
                Err(e) => {
                    report.failed_ledger_updates += 1;
                    error!(
                        "Error updating alert attributes for alert '{}' and rule '{}': {}",
                        alert.id, self.name, e
                    );
                }
            }
        }

        marked
    }
}

fn count_failures(outcomes: &[DispatchOutcome]) -> usize {
    outcomes.iter().filter(|o| !o.is_success()).count()
}
