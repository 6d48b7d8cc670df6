//! # alerta-notifications
//!
//! Polls an [Alerta](https://alerta.io) server and routes alerts to mail and
//! Slack channels.
//!
//! Every configured rule runs an Alerta query on a fixed interval. Alerts the
//! rule has not announced yet are sent to the rule's channels and marked on
//! the Alerta side with a `notifications <rule>` attribute, so a restart does
//! not announce them again. Alerts that disappear from a rule's result are
//! announced as closed.
//!
//! ## Running
//!
//! ```rust,no_run
//! use alerta_notifications::{Config, Notifier};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/notifications.yml").await?;
//!     let mut notifier = Notifier::new(&config, false)?;
//!     notifier
//!         .run(async {
//!             let _ = tokio::signal::ctrl_c().await;
//!         })
//!         .await;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod alerta;
pub mod config;
pub mod notifications;
pub mod rules;
pub mod scheduler;
pub mod utils;

pub use alerta::{Alert, AlertSource, AlertaClient};
pub use config::Config;
pub use notifications::{ChannelRegistry, Dispatcher, NotificationChannel};
pub use rules::{Classification, RuleHandler, RuleState, classify};
pub use scheduler::Scheduler;
pub use utils::error::{NotifierError, Result};

use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// The assembled notifier: Alerta client, channels and scheduler
pub struct Notifier {
    scheduler: Scheduler,
}

impl Notifier {
    /// Wire every component from a validated configuration
    ///
    /// `dry_run` suppresses every outbound write: mails, webhooks and
    /// attribute updates are rendered and logged only.
    pub fn new(config: &Config, dry_run: bool) -> Result<Self> {
        let source: Arc<dyn AlertSource> = Arc::new(AlertaClient::new(config.alerta(), dry_run)?);

        let registry = ChannelRegistry::from_config(config)?;
        info!("{} channel(s) loaded successfully", registry.len());

        let dispatcher = Dispatcher::new(Arc::new(registry), dry_run);
        let scheduler = Scheduler::new(config, source, dispatcher)?;

        if dry_run {
            info!("DryRun mode is active: nothing will be sent or updated");
        }

        Ok(Self { scheduler })
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Poll until `shutdown` resolves
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!("Starting {} {}", NAME, VERSION);
        self.scheduler.run(shutdown).await;
        info!("Scheduler stopped after {} tick(s)", self.scheduler.ticks());
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
