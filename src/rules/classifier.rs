//! Alert lifecycle classification

use crate::alerta::Alert;
use std::collections::HashSet;

/// The three disjoint views of one polling cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    /// Open alerts the rule already announced on an earlier cycle
    pub already_notified: Vec<Alert>,
    /// Open alerts the rule has not announced yet
    pub newly_open: Vec<Alert>,
    /// Alerts open on the previous cycle that are no longer returned
    pub closed: Vec<Alert>,
}

/// Classify the current open alerts of a rule against its previous cycle
///
/// Both partitions keep the order of `current_open`. Closed alerts are
/// matched by id only and keep the order of `previous_open`.
pub fn classify(current_open: &[Alert], previous_open: &[Alert], rule_id: &str) -> Classification {
    let (already_notified, newly_open): (Vec<Alert>, Vec<Alert>) = current_open
        .iter()
        .cloned()
        .partition(|alert| alert.already_notified(rule_id));

    let current_ids: HashSet<&str> = current_open.iter().map(|a| a.id.as_str()).collect();
    let closed = previous_open
        .iter()
        .filter(|alert| !current_ids.contains(alert.id.as_str()))
        .cloned()
        .collect();

    Classification {
        already_notified,
        newly_open,
        closed,
    }
}
