//! Helper functions for creating specific error types

use super::types::NotifierError;

/// Helper functions for creating specific errors
impl NotifierError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn alerta<S: Into<String>>(message: S) -> Self {
        Self::Alerta(message.into())
    }

    pub fn channel<S: Into<String>>(message: S) -> Self {
        Self::Channel(message.into())
    }

    pub fn email<S: Into<String>>(message: S) -> Self {
        Self::Email(message.into())
    }

    pub fn slack<S: Into<String>>(message: S) -> Self {
        Self::Slack(message.into())
    }
}
