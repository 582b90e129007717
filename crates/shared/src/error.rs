use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Remote,
    Network,
    Clipboard,
    Config,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    /// Rejected locally, no request was made.
    #[error("{0}")]
    Validation(String),
    #[error("server rejected the request ({}): {message}", status_label(.status))]
    Remote {
        status: Option<u16>,
        message: String,
    },
    #[error("network error: {0}")]
    Network(String),
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("invalid client configuration: {0}")]
    Config(String),
}

fn status_label(status: &Option<u16>) -> String {
    status.map_or_else(|| "no status".to_string(), |code| format!("HTTP {code}"))
}

impl ShortenerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::Validation,
            Self::Remote { .. } => ErrorCode::Remote,
            Self::Network(_) => ErrorCode::Network,
            Self::Clipboard(_) => ErrorCode::Clipboard,
            Self::Config(_) => ErrorCode::Config,
        }
    }

    /// Text shown to the user in a notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Remote { message, .. } if message.is_empty() => {
                "Unable to shorten URL.".to_string()
            }
            Self::Remote { message, .. } => format!("Error: {message}"),
            Self::Network(message) => format!("Error: {message}"),
            Self::Clipboard(message) => format!("Failed to copy: {message}"),
            Self::Config(message) => format!("Configuration error: {message}"),
        }
    }
}
