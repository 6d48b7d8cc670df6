//! Common test utilities for alerta-notifications

pub mod doubles;
pub mod fixtures;

pub use doubles::{InMemoryAlertSource, RecordingChannel};
pub use fixtures::{AlertFactory, ConfigFactory};
