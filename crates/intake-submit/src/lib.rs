//! Webhook delivery for lead intake.
//!
//! [`WebhookClient`] posts a [`ParsedTable`](intake_model::ParsedTable) as
//! JSON to a configured URL, once, with a 30 second timeout. The URL itself
//! lives behind a [`ConfigStore`] so callers choose where it is persisted.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;

pub use client::{
    DEFAULT_TIMEOUT, SUCCESS_MESSAGE, SubmissionReceipt, WebhookClient, WebhookClientBuilder,
    parse_webhook_url,
};
pub use config::{
    BUILD_DEFAULT_URL, ConfigStore, FileConfigStore, MemoryConfigStore, UrlSource, WEBHOOK_URL_KEY,
    WebhookConfig,
};
pub use error::{ConfigError, Result, SubmitError};
pub use payload::WebhookPayload;
