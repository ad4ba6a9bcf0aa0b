//! Interactive session: one current file, one webhook URL.
//!
//! A session moves through the same steps a person does: pick a file, look
//! at the validation result, optionally send. Picking a new file replaces
//! the previous one. Sending needs `&mut self`, so two sends can never be
//! in flight at once.

use std::path::Path;

use tracing::{debug, info, warn};

use intake_ingest::{IngestError, SelectedFile, load_upload};
use intake_model::{ParsedTable, SubmissionOutcome, ValidationOutcome};
use intake_submit::{BUILD_DEFAULT_URL, ConfigError, ConfigStore, WebhookClient, WebhookConfig};
use intake_validate::{summary_message, validate_table};

/// Message returned when sending is attempted without a valid file.
pub const NOTHING_TO_SEND: &str =
    "Upload a CSV file that contains every required field before sending.";

/// What happened to a selected file.
///
/// Each variant is a separate state: a file that could not be parsed never
/// carries a validation result, and a validation failure always does.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Refused before parsing (type, size, empty, unreadable).
    Rejected(IngestError),
    /// Could not be decoded, or decoded to no headers or no rows.
    ParseFailed(IngestError),
    /// Parsed, but required headers are missing.
    Invalid(ValidationOutcome),
    /// Parsed and every required header is present.
    Ready(ValidationOutcome),
}

impl LoadOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Validation result, when parsing got that far.
    pub fn validation(&self) -> Option<&ValidationOutcome> {
        match self {
            Self::Invalid(outcome) | Self::Ready(outcome) => Some(outcome),
            Self::Rejected(_) | Self::ParseFailed(_) => None,
        }
    }

    /// Short user-facing description.
    pub fn message(&self) -> String {
        match self {
            Self::Rejected(err) | Self::ParseFailed(err) => err.user_message().to_string(),
            Self::Invalid(outcome) | Self::Ready(outcome) => summary_message(outcome),
        }
    }

    /// Stable name of the outcome kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Rejected(_) => "rejected",
            Self::ParseFailed(_) => "parse_failed",
            Self::Invalid(_) => "invalid",
            Self::Ready(_) => "ready",
        }
    }
}

/// The file currently held by the session.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub name: String,
    pub size: u64,
    pub table: ParsedTable,
    pub validation: ValidationOutcome,
}

/// Owns the current file and webhook configuration.
pub struct Session<S> {
    store: S,
    client: WebhookClient,
    webhook: WebhookConfig,
    current: Option<LoadedFile>,
}

impl<S: ConfigStore> Session<S> {
    /// Starts a session, reading the saved webhook URL from `store`.
    ///
    /// An unreadable store leaves the URL unset; checking files does not
    /// need it and an override or a later save still applies.
    pub fn new(store: S, client: WebhookClient) -> Self {
        let webhook = match WebhookConfig::load(&store, BUILD_DEFAULT_URL) {
            Ok(webhook) => webhook,
            Err(error) => {
                warn!(%error, "could not read webhook settings");
                WebhookConfig::unset()
            }
        };
        debug!(source = %webhook.source(), "webhook configuration loaded");
        Self {
            store,
            client,
            webhook,
            current: None,
        }
    }

    /// Uses `url` for this session without saving it.
    #[must_use]
    pub fn with_webhook_override(mut self, url: Option<&str>) -> Self {
        self.webhook = self.webhook.with_override(url);
        self
    }

    pub fn webhook(&self) -> &WebhookConfig {
        &self.webhook
    }

    /// Saves a new webhook URL and uses it from now on.
    pub fn set_webhook_url(&mut self, url: &str) -> Result<(), ConfigError> {
        self.webhook = WebhookConfig::save(&self.store, url)?;
        info!("webhook URL updated");
        Ok(())
    }

    /// Reads a file from disk and loads it.
    pub fn select_path(&mut self, path: &Path, declared_type: Option<String>) -> LoadOutcome {
        match SelectedFile::from_path(path, declared_type) {
            Ok(file) => self.select_file(&file),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "file rejected");
                LoadOutcome::Rejected(err)
            }
        }
    }

    /// Loads a selected file, replacing the current one once parsing starts.
    ///
    /// A file refused by the upload gate leaves the current file in place.
    pub fn select_file(&mut self, file: &SelectedFile) -> LoadOutcome {
        let table = match load_upload(file) {
            Ok(table) => table,
            Err(err) if err.is_rejection() => {
                warn!(file_name = %file.name, error = %err, "file rejected");
                return LoadOutcome::Rejected(err);
            }
            Err(err) => {
                warn!(file_name = %file.name, error = %err, "file could not be parsed");
                self.current = None;
                return LoadOutcome::ParseFailed(err);
            }
        };

        let validation = validate_table(&table);
        info!(
            file_name = %file.name,
            row_count = table.row_count(),
            missing_count = validation.missing_count(),
            "file validated"
        );
        self.current = Some(LoadedFile {
            name: file.name.clone(),
            size: file.size(),
            table,
            validation: validation.clone(),
        });
        if validation.is_valid {
            LoadOutcome::Ready(validation)
        } else {
            LoadOutcome::Invalid(validation)
        }
    }

    pub fn current(&self) -> Option<&LoadedFile> {
        self.current.as_ref()
    }

    /// True when the current file passed validation.
    pub fn can_send(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|file| file.validation.is_valid)
    }

    /// Sends the current file to the configured webhook, once.
    pub async fn send(&mut self) -> SubmissionOutcome {
        let Some(file) = self.current.as_ref().filter(|file| file.validation.is_valid) else {
            return SubmissionOutcome::failed(NOTHING_TO_SEND);
        };
        let outcome = self.client.submit(self.webhook.url(), &file.table).await;
        if outcome.success {
            info!(file_name = %file.name, row_count = file.table.row_count(), "file sent");
        } else {
            warn!(file_name = %file.name, error = outcome.text(), "send failed");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_model::REQUIRED_FIELDS;
    use intake_submit::{MemoryConfigStore, WEBHOOK_URL_KEY};

    fn session() -> Session<MemoryConfigStore> {
        let client = WebhookClient::builder().no_proxy().build().unwrap();
        Session::new(MemoryConfigStore::new(), client)
    }

    fn csv_file(name: &str, content: &str) -> SelectedFile {
        SelectedFile::new(name, None, content.as_bytes().to_vec())
    }

    fn valid_csv() -> String {
        format!("{}\n{}\n", REQUIRED_FIELDS.join(","), vec!["v"; 14].join(","))
    }

    #[test]
    fn test_valid_file_is_ready() {
        let mut session = session();
        let outcome = session.select_file(&csv_file("leads.csv", &valid_csv()));
        assert!(outcome.is_ready());
        assert!(session.can_send());
        assert_eq!(session.current().map(|f| f.table.row_count()), Some(1));
    }

    #[test]
    fn test_missing_headers_is_invalid_not_parse_failure() {
        let mut session = session();
        let outcome = session.select_file(&csv_file("leads.csv", "email\nx\n"));
        assert!(matches!(outcome, LoadOutcome::Invalid(_)));
        assert_eq!(outcome.validation().map(|v| v.missing_count()), Some(13));
        assert!(!session.can_send());
    }

    #[test]
    fn test_no_rows_is_parse_failure_without_validation() {
        let mut session = session();
        let outcome = session.select_file(&csv_file("leads.csv", &generate_header_only()));
        assert!(matches!(
            outcome,
            LoadOutcome::ParseFailed(IngestError::NoDataRows)
        ));
        assert!(outcome.validation().is_none());
        assert!(session.current().is_none());
    }

    #[test]
    fn test_rejection_keeps_previous_file() {
        let mut session = session();
        session.select_file(&csv_file("leads.csv", &valid_csv()));
        let outcome = session.select_file(&csv_file("leads.pdf", "%PDF"));
        assert!(matches!(outcome, LoadOutcome::Rejected(_)));
        assert!(session.can_send());
    }

    #[test]
    fn test_parse_failure_clears_previous_file() {
        let mut session = session();
        session.select_file(&csv_file("leads.csv", &valid_csv()));
        session.select_file(&csv_file("other.csv", "\n\n"));
        assert!(session.current().is_none());
        assert!(!session.can_send());
    }

    #[test]
    fn test_set_webhook_url_persists() {
        let mut session = session();
        session
            .set_webhook_url(" https://hooks.example.com/x ")
            .unwrap();
        assert_eq!(session.webhook().url(), "https://hooks.example.com/x");
        assert_eq!(
            session.store.get(WEBHOOK_URL_KEY).unwrap().as_deref(),
            Some("https://hooks.example.com/x")
        );
    }

    #[tokio::test]
    async fn test_send_without_valid_file() {
        let mut session = session();
        let outcome = session.send().await;
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some(NOTHING_TO_SEND));
    }

    #[tokio::test]
    async fn test_send_without_webhook_url() {
        let mut session = session();
        session.select_file(&csv_file("leads.csv", &valid_csv()));
        let outcome = session.send().await;
        assert!(!outcome.success);
        assert!(outcome.text().contains("not configured"));
    }

    struct UnreadableStore;

    impl ConfigStore for UnreadableStore {
        fn get(&self, _key: &str) -> Result<Option<String>, ConfigError> {
            Err(ConfigError::Parse {
                path: "settings.toml".into(),
                message: "unclosed array".to_string(),
            })
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), ConfigError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_unreadable_settings_still_check_and_send() {
        let client = WebhookClient::builder().no_proxy().build().unwrap();
        let mut session = Session::new(UnreadableStore, client);
        assert!(!session.webhook().is_configured());

        let outcome = session.select_file(&csv_file("leads.csv", &valid_csv()));
        assert!(outcome.is_ready());

        let outcome = session.send().await;
        assert!(!outcome.success);
        assert!(outcome.text().contains("not configured"));

        let session = session.with_webhook_override(Some("https://hooks.example.com/x"));
        assert_eq!(session.webhook().url(), "https://hooks.example.com/x");
    }

    fn generate_header_only() -> String {
        format!("{}\n", REQUIRED_FIELDS.join(","))
    }
}
