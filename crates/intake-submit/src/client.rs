//! Webhook HTTP client.
//!
//! One POST per call. No retries, no backoff: the caller decides whether to
//! try again.

use std::time::{Duration, Instant};

use reqwest::Client;
use reqwest::header::USER_AGENT;
use tracing::{debug, info, warn};
use url::Url;

use intake_model::{ParsedTable, SubmissionOutcome};

use crate::error::{Result, SubmitError};
use crate::payload::WebhookPayload;

/// Request timeout, measured from send.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Message reported after a successful delivery.
pub const SUCCESS_MESSAGE: &str = "Data successfully sent to webhook";

/// Details of a successful delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub status: u16,
    pub row_count: usize,
    /// True when the response body parsed as JSON. Informational only.
    pub json_response: bool,
}

/// Client for delivering parsed uploads to a webhook.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Client,
    timeout: Duration,
}

/// Builder for [`WebhookClient`].
#[derive(Debug, Clone)]
pub struct WebhookClientBuilder {
    timeout: Duration,
    use_system_proxy: bool,
}

impl Default for WebhookClientBuilder {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            use_system_proxy: true,
        }
    }
}

impl WebhookClientBuilder {
    /// Overrides the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ignores `HTTP_PROXY`/`HTTPS_PROXY` and connects directly.
    #[must_use]
    pub fn no_proxy(mut self) -> Self {
        self.use_system_proxy = false;
        self
    }

    pub fn build(self) -> Result<WebhookClient> {
        let mut builder = Client::builder();
        if !self.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| SubmitError::Client(e.to_string()))?;
        Ok(WebhookClient {
            client,
            timeout: self.timeout,
        })
    }
}

impl WebhookClient {
    /// Create a client with the default 30 second timeout.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> WebhookClientBuilder {
        WebhookClientBuilder::default()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends `table` to `url` and folds the result into a display outcome.
    pub async fn submit(&self, url: &str, table: &ParsedTable) -> SubmissionOutcome {
        match self.try_submit(url, table).await {
            Ok(_) => SubmissionOutcome::succeeded(SUCCESS_MESSAGE),
            Err(err) => SubmissionOutcome::failed(err.user_message()),
        }
    }

    /// Sends `table` to `url` as a single JSON POST.
    ///
    /// The URL is checked before any network activity. A 2xx response is a
    /// success whatever its body; anything else becomes a [`SubmitError`].
    pub async fn try_submit(&self, url: &str, table: &ParsedTable) -> Result<SubmissionReceipt> {
        let url = parse_webhook_url(url)?;
        let payload = WebhookPayload::from(table);
        let started = Instant::now();
        debug!(
            host = url.host_str().unwrap_or_default(),
            row_count = payload.row_count,
            "sending to webhook"
        );

        let response = self
            .client
            .post(url.as_str())
            .header(
                USER_AGENT,
                format!("lead-intake/{}", env!("CARGO_PKG_VERSION")),
            )
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "webhook request failed"))?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown error");
            let body = match response.text().await {
                Ok(text) if !text.is_empty() => text,
                _ => reason.to_string(),
            };
            warn!(
                status = status.as_u16(),
                duration_ms = started.elapsed().as_millis(),
                "webhook rejected upload"
            );
            return Err(SubmitError::Http {
                status: status.as_u16(),
                body,
            });
        }

        // Body is optional and its format is not part of the contract.
        let json_response = match response.text().await {
            Ok(text) => serde_json::from_str::<serde_json::Value>(&text).is_ok(),
            Err(e) => {
                debug!(error = %e, "ignoring unreadable webhook response body");
                false
            }
        };
        info!(
            status = status.as_u16(),
            row_count = payload.row_count,
            json_response,
            duration_ms = started.elapsed().as_millis(),
            "webhook delivered"
        );
        Ok(SubmissionReceipt {
            status: status.as_u16(),
            row_count: payload.row_count,
            json_response,
        })
    }
}

/// Validates a webhook URL without touching the network.
pub fn parse_webhook_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SubmitError::ConfigurationMissing);
    }
    let url = Url::parse(trimmed).map_err(|e| SubmitError::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SubmitError::InvalidUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_url_is_missing_configuration() {
        assert!(matches!(
            parse_webhook_url(""),
            Err(SubmitError::ConfigurationMissing)
        ));
        assert!(matches!(
            parse_webhook_url("   "),
            Err(SubmitError::ConfigurationMissing)
        ));
    }

    #[test]
    fn test_malformed_url_is_invalid() {
        assert!(matches!(
            parse_webhook_url("not a url"),
            Err(SubmitError::InvalidUrl { .. })
        ));
        assert!(matches!(
            parse_webhook_url("/webhook/abc"),
            Err(SubmitError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_non_http_scheme_is_invalid() {
        assert!(matches!(
            parse_webhook_url("ftp://example.com/hook"),
            Err(SubmitError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let url = parse_webhook_url("  https://hooks.example.com/abc  ").unwrap();
        assert_eq!(url.as_str(), "https://hooks.example.com/abc");
    }

    #[test]
    fn test_default_timeout() {
        let client = WebhookClient::new().unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(30));
    }
}
