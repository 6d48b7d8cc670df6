//! Per-rule alert lifecycle tracking
//!
//! Each rule remembers the open alerts it saw on the previous cycle. Comparing
//! that set with a fresh fetch and with the notification ledger yields the
//! alerts to announce as new and as closed.

mod classifier;
mod handler;
mod state;

pub use classifier::{Classification, classify};
pub use handler::{CycleReport, RuleHandler};
pub use state::RuleState;
