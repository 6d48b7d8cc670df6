//! Notification channels and dispatch
//!
//! Channels deliver batches of newly opened or closed alerts. The dispatcher
//! fans a batch out to every channel of a rule, each send independent of
//! the others.

pub mod channels;
mod dispatcher;
mod events;
mod render;

pub use channels::{ChannelRegistry, ChannelType, MailChannel, NotificationChannel, SlackChannel};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use events::{ClosedAlertsEvent, OpenAlertsEvent};
