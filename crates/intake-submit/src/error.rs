//! Error types for webhook delivery and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from a single webhook delivery attempt.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    /// No webhook URL is set.
    #[error("webhook URL is not configured")]
    ConfigurationMissing,

    /// URL is not an absolute http(s) URL.
    #[error("invalid webhook URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// No response within the timeout.
    #[error("webhook request timed out")]
    Timeout,

    /// Transport failure: DNS, refused connection, offline.
    #[error("network error: {0}")]
    Network(String),

    /// Endpoint answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl SubmitError {
    /// Returns a user-friendly error message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationMissing => {
                "Webhook URL is not configured. Please set the webhook URL.".to_string()
            }
            Self::InvalidUrl { .. } => {
                "Invalid webhook URL format. Please check the URL and try again.".to_string()
            }
            Self::Timeout => {
                "Request timed out. Please check your connection and try again.".to_string()
            }
            Self::Network(_) => {
                "Network error. Please check your connection and webhook URL.".to_string()
            }
            Self::Http { status, body } => format!("HTTP {status}: {body}"),
            Self::Client(_) => "Could not start the HTTP client.".to_string(),
        }
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Errors reading or writing the stored webhook URL.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Refused to store an empty URL.
    #[error("webhook URL must not be empty")]
    EmptyUrl,

    /// Settings file I/O failed.
    #[error("failed to {operation} settings file {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file exists but is not valid TOML.
    #[error("settings file {path} is malformed: {message}")]
    Parse { path: PathBuf, message: String },

    /// Settings could not be serialized.
    #[error("failed to serialize settings: {0}")]
    Serialize(String),
}

/// Result type alias for submission operations.
pub type Result<T> = std::result::Result<T, SubmitError>;
