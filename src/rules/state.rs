//! Rolling per-rule memory

use crate::alerta::Alert;

/// What a rule saw on its previous successful fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RuleState {
    /// No successful fetch yet
    #[default]
    Uninitialized,
    Tracking { previous_open: Vec<Alert> },
}

impl RuleState {
    /// Open alerts of the previous cycle; empty before the first fetch
    pub fn previous_open(&self) -> &[Alert] {
        match self {
            RuleState::Uninitialized => &[],
            RuleState::Tracking { previous_open } => previous_open,
        }
    }

    /// Replace the remembered set with a freshly fetched one
    pub fn advance(&mut self, current_open: Vec<Alert>) {
        *self = RuleState::Tracking {
            previous_open: current_open,
        };
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self, RuleState::Tracking { .. })
    }

    /// Number of alerts remembered
    pub fn tracked(&self) -> usize {
        self.previous_open().len()
    }

    pub fn reset(&mut self) {
        *self = RuleState::Uninitialized;
    }
}
