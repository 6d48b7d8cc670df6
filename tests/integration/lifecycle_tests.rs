//! Alert lifecycle scenarios through `RuleHandler`

use crate::common::{AlertFactory, InMemoryAlertSource, RecordingChannel};
use alerta_notifications::config::RuleConfig;
use alerta_notifications::notifications::{ChannelRegistry, Dispatcher};
use alerta_notifications::{Alert, RuleHandler};
use std::sync::Arc;

const RULE: &str = "production";

struct Harness {
    source: Arc<InMemoryAlertSource>,
    mail: Arc<RecordingChannel>,
    slack: Arc<RecordingChannel>,
    handler: RuleHandler,
}

fn harness(open: Vec<Alert>, mail: RecordingChannel, dry_run: bool) -> Harness {
    let source = Arc::new(InMemoryAlertSource::new(open));
    let mail = Arc::new(mail);
    let slack = Arc::new(RecordingChannel::new());

    let mut registry = ChannelRegistry::new();
    registry.insert("mail", mail.clone());
    registry.insert("slack", slack.clone());
    let dispatcher = Dispatcher::new(Arc::new(registry), dry_run);

    let handler = RuleHandler::new(
        RULE,
        RuleConfig::new("status=open", &["mail", "slack"]),
        source.clone(),
        dispatcher,
    );

    Harness {
        source,
        mail,
        slack,
        handler,
    }
}

#[tokio::test]
async fn test_three_new_alerts_are_announced_once_per_channel() {
    let mut h = harness(AlertFactory::batch(3), RecordingChannel::new(), false);

    let report = h.handler.evaluate().await;

    assert_eq!(report.newly_open, 3);
    for channel in [&h.mail, &h.slack] {
        let events = channel.open_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].new_alert_count, 3);
        assert_eq!(events[0].already_notified, 0);
        assert!(channel.closed_events().is_empty());
    }

    let updates = h.source.updates();
    assert_eq!(updates.len(), 3);
    assert!(updates.iter().all(|(_, rule)| rule == RULE));
}

#[tokio::test]
async fn test_second_cycle_does_not_repeat() {
    let mut h = harness(AlertFactory::batch(2), RecordingChannel::new(), false);

    h.handler.evaluate().await;
    let report = h.handler.evaluate().await;

    assert_eq!(report.newly_open, 0);
    assert_eq!(report.already_notified, 2);
    assert_eq!(h.mail.open_events().len(), 1);
    assert_eq!(h.source.updates().len(), 2);
}

#[tokio::test]
async fn test_already_marked_alert_is_not_sent() {
    let mut h = harness(
        vec![AlertFactory::notified("a", RULE)],
        RecordingChannel::new(),
        false,
    );

    let report = h.handler.evaluate().await;

    assert_eq!(report.already_notified, 1);
    assert!(h.mail.open_events().is_empty());
    assert!(h.slack.open_events().is_empty());
    assert!(h.source.updates().is_empty());
}

#[tokio::test]
async fn test_already_notified_count_is_reported() {
    let mut h = harness(
        vec![AlertFactory::notified("a", RULE), AlertFactory::with_id("b")],
        RecordingChannel::new(),
        false,
    );

    h.handler.evaluate().await;

    let events = h.slack.open_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].new_alert_count, 1);
    assert_eq!(events[0].new_alerts[0].id, "b");
    assert_eq!(events[0].already_notified, 1);
}

#[tokio::test]
async fn test_closed_alerts_are_announced() {
    let open = vec![
        AlertFactory::with_id("a"),
        AlertFactory::with_id("b"),
        AlertFactory::with_id("c"),
    ];
    let mut h = harness(open, RecordingChannel::new(), false);
    h.handler.evaluate().await;

    h.source.close(&["a", "c"]);
    let report = h.handler.evaluate().await;

    assert_eq!(report.closed, 2);
    for channel in [&h.mail, &h.slack] {
        let closed = channel.closed_events();
        assert_eq!(closed.len(), 1);
        let ids: Vec<_> = closed[0].alerts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    // closed alerts are reported once only
    let report = h.handler.evaluate().await;
    assert_eq!(report.closed, 0);
    assert_eq!(h.mail.closed_events().len(), 1);
}

#[tokio::test]
async fn test_failing_channel_does_not_block_the_other() {
    let mut h = harness(vec![AlertFactory::with_id("a")], RecordingChannel::failing(), false);

    let report = h.handler.evaluate().await;

    assert_eq!(report.failed_sends, 1);
    assert_eq!(h.mail.open_events().len(), 1);
    assert_eq!(h.slack.open_events().len(), 1);
    // the ledger is written regardless of channel failures
    assert_eq!(h.source.updates(), vec![("a".to_string(), RULE.to_string())]);
    assert!(h.source.open()[0].already_notified(RULE));
}

#[tokio::test]
async fn test_fetch_failure_keeps_previous_set() {
    let mut h = harness(
        vec![AlertFactory::with_id("a"), AlertFactory::with_id("b")],
        RecordingChannel::new(),
        false,
    );
    h.handler.evaluate().await;

    h.source.fail_fetch(true);
    let report = h.handler.evaluate().await;
    assert!(report.fetch_failed());
    assert_eq!(h.handler.state().tracked(), 2);

    // the set recorded before the outage is still used for closing
    h.source.fail_fetch(false);
    h.source.close(&["b"]);
    let report = h.handler.evaluate().await;
    assert_eq!(report.closed, 1);
    assert_eq!(h.mail.closed_events()[0].alerts[0].id, "b");
}

#[tokio::test]
async fn test_ledger_failure_means_alert_is_sent_again() {
    let mut h = harness(vec![AlertFactory::with_id("a")], RecordingChannel::new(), false);
    h.source.fail_updates(true);

    let report = h.handler.evaluate().await;
    assert_eq!(report.failed_ledger_updates, 1);

    h.source.fail_updates(false);
    h.handler.evaluate().await;

    assert_eq!(h.mail.open_events().len(), 2);
    assert!(h.source.open()[0].already_notified(RULE));
}

#[tokio::test]
async fn test_restart_with_persisted_ledger_sends_nothing() {
    let mut first = harness(AlertFactory::batch(2), RecordingChannel::new(), false);
    first.handler.evaluate().await;

    // a fresh handler sees the attributes written by the previous process
    let mut second = harness(first.source.open(), RecordingChannel::new(), false);
    let report = second.handler.evaluate().await;

    assert_eq!(report.already_notified, 2);
    assert!(second.mail.open_events().is_empty());
}

#[tokio::test]
async fn test_dry_run_is_forwarded_to_channels() {
    let mut h = harness(vec![AlertFactory::with_id("a")], RecordingChannel::new(), true);

    h.handler.evaluate().await;
    h.source.set_open(Vec::new());
    h.handler.evaluate().await;

    assert_eq!(h.mail.dry_runs(), vec![true, true]);
}
