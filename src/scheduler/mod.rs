//! Polling scheduler
//!
//! A single timer drives every rule. Each tick spawns one task per rule and
//! waits for all of them, so a rule is never evaluated twice at once.

use crate::alerta::AlertSource;
use crate::config::{Config, RuleConfig};
use crate::notifications::Dispatcher;
use crate::rules::{CycleReport, RuleHandler};
use crate::utils::error::Result;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

/// Summary of one tick across all rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub rules: usize,
    pub failed_fetches: usize,
    pub newly_open: usize,
    pub closed: usize,
    /// Channel sends that returned an error
    pub failed_sends: usize,
    pub failed_ledger_updates: usize,
    /// Rules whose task panicked and whose state was reset
    pub crashed: usize,
}

impl TickSummary {
    fn record(&mut self, report: &CycleReport) {
        if report.fetch_failed() {
            self.failed_fetches += 1;
        }
        self.newly_open += report.newly_open;
        self.closed += report.closed;
        self.failed_sends += report.failed_sends;
        self.failed_ledger_updates += report.failed_ledger_updates;
    }
}

/// Owns the rule handlers and drives them on a fixed period
pub struct Scheduler {
    interval: Duration,
    handlers: Vec<RuleHandler>,
    source: Arc<dyn AlertSource>,
    dispatcher: Dispatcher,
    ticks: u64,
}

impl Scheduler {
    /// Build one handler per configured rule
    ///
    /// Every channel a rule names must be present in the dispatcher's
    /// registry.
    pub fn new(config: &Config, source: Arc<dyn AlertSource>, dispatcher: Dispatcher) -> Result<Self> {
        dispatcher.registry().check_rule_references(config.rules())?;

        let handlers = config
            .rules()
            .iter()
            .map(|(name, rule)| {
                RuleHandler::new(name.clone(), rule.clone(), source.clone(), dispatcher.clone())
            })
            .collect();

        Ok(Self {
            interval: config.alerta().reload_interval(),
            handlers,
            source,
            dispatcher,
            ticks: 0,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn handlers(&self) -> &[RuleHandler] {
        &self.handlers
    }

    /// Number of completed ticks
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Evaluate every rule once
    ///
    /// A rule whose task panics is rebuilt with a fresh state; the other
    /// rules are unaffected.
    pub async fn tick(&mut self) -> TickSummary {
        let handlers = std::mem::take(&mut self.handlers);
        let mut summary = TickSummary {
            rules: handlers.len(),
            ..TickSummary::default()
        };

        let tasks: Vec<(String, RuleConfig, _)> = handlers
            .into_iter()
            .map(|mut handler| {
                let name = handler.name().to_string();
                let rule = handler.rule().clone();
                let task = tokio::spawn(async move {
                    let report = handler.evaluate().await;
                    (handler, report)
                });
                (name, rule, task)
            })
            .collect();

        for (name, rule, task) in tasks {
            match task.await {
                Ok((handler, report)) => {
                    summary.record(&report);
                    self.handlers.push(handler);
                }
                Err(e) => {
                    error!("Evaluation of rule {} aborted, resetting its state: {}", name, e);
                    summary.crashed += 1;
                    self.handlers.push(RuleHandler::new(
                        name,
                        rule,
                        self.source.clone(),
                        self.dispatcher.clone(),
                    ));
                }
            }
        }

        self.ticks += 1;
        summary
    }

    /// Tick until `shutdown` resolves
    ///
    /// The first tick fires one interval after start. Shutdown is only
    /// observed between ticks, so a running tick always completes.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(
            "Waiting for {:?} before fetching alerts of {} rule(s)",
            self.interval,
            self.handlers.len()
        );

        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping scheduler");
                    break;
                }
                _ = ticker.tick() => {}
            }

            debug!("Fetching Alerta alerts (tick {})", self.ticks + 1);
            let summary = self.tick().await;
            info!(
                "Tick {}: {} rule(s), {} new, {} closed, {} failed fetch(es), {} failed send(s), {} failed ledger update(s)",
                self.ticks,
                summary.rules,
                summary.newly_open,
                summary.closed,
                summary.failed_fetches,
                summary.failed_sends,
                summary.failed_ledger_updates
            );
        }
    }
}
