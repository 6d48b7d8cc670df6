//! Configuration data models
//!
//! This module defines all configuration structures read from the YAML file.

pub mod alerta;
pub mod channel;
pub mod notifier;
pub mod rule;

// Re-export all configuration types
pub use alerta::*;
pub use channel::*;
pub use notifier::*;
pub use rule::*;

/// Default reload interval in seconds
pub fn default_reload_interval() -> u64 {
    30
}

/// Default Alerta request timeout in seconds
pub fn default_timeout() -> u64 {
    10
}

/// Default SMTP port
pub fn default_smtp_port() -> u16 {
    25
}

/// Default Slack icon
pub fn default_icon_emoji() -> String {
    ":rocket:".to_string()
}
