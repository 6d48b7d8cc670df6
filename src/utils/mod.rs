//! Utility modules
//!
//! - **error**: crate error type and `Result` alias
//! - **logging**: tracing subscriber setup
//! - **signal**: process shutdown signals

pub mod error;
pub mod logging;
pub mod signal;
