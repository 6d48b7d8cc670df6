//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.
//!
//! - `trait_def`: Core Validate trait definition
//! - `url`: http(s) URL checks
//! - `config_validators`: validators for the notifier configuration
//! - `tests`: Test suite for all validators

mod config_validators;
mod trait_def;
mod url;

pub use trait_def::Validate;
pub use url::validate_http_url;
