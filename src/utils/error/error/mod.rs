//! Error handling for the notifier
//!
//! This module defines all error types used throughout the crate.

mod helpers;
mod types;

pub use types::{NotifierError, Result};
