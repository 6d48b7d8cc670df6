//! Error types for the notifier

use thiserror::Error;

/// Result type alias for the notifier
pub type Result<T> = std::result::Result<T, NotifierError>;

/// Main error type for the notifier
#[derive(Error, Debug)]
pub enum NotifierError {
    /// Configuration errors, fatal at startup
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Alerta API errors (unexpected status, malformed payload)
    #[error("Alerta error: {0}")]
    Alerta(String),

    /// Generic channel errors (unknown channel, rendering)
    #[error("Channel error: {0}")]
    Channel(String),

    /// Email delivery errors
    #[error("Email error: {0}")]
    Email(String),

    /// Slack webhook errors
    #[error("Slack error: {0}")]
    Slack(String),
}

impl From<lettre::transport::smtp::Error> for NotifierError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        NotifierError::Email(err.to_string())
    }
}

impl From<lettre::error::Error> for NotifierError {
    fn from(err: lettre::error::Error) -> Self {
        NotifierError::Email(format!("Failed to build email: {}", err))
    }
}

impl From<lettre::address::AddressError> for NotifierError {
    fn from(err: lettre::address::AddressError) -> Self {
        NotifierError::Email(format!("Invalid address: {}", err))
    }
}
