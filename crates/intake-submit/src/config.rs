//! Webhook URL configuration.
//!
//! The URL is a single string under [`WEBHOOK_URL_KEY`] in a [`ConfigStore`].
//! A saved value wins over the build-time default; saving overwrites.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use crate::error::ConfigError;

/// Storage key for the webhook URL.
pub const WEBHOOK_URL_KEY: &str = "webhook_url";

/// Default URL baked in at build time, if `LEAD_INTAKE_WEBHOOK_URL` was set.
pub const BUILD_DEFAULT_URL: Option<&str> = option_env!("LEAD_INTAKE_WEBHOOK_URL");

/// Minimal string key/value persistence.
pub trait ConfigStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError>;
}

/// Settings stored as a flat TOML table on disk.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    /// Store at the platform config directory (`settings.toml`).
    pub fn open_default() -> Self {
        Self::at(Self::default_path())
    }

    /// Store at a specific path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "LeadIntake", "lead-intake")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }

    fn load(&self) -> Result<toml::Table, ConfigError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(toml::Table::new()),
            Err(source) => {
                return Err(ConfigError::Io {
                    operation: "read",
                    path: self.path.clone(),
                    source,
                });
            }
        };
        content.parse::<toml::Table>().map_err(|e| ConfigError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}

impl ConfigStore for FileConfigStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match self.load()?.remove(key) {
            Some(toml::Value::String(value)) => Ok(Some(value)),
            Some(other) => {
                warn!(
                    path = %self.path.display(),
                    key,
                    kind = other.type_str(),
                    "ignoring non-string setting"
                );
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Replaces `key`, keeping every other entry. A malformed file is
    /// replaced rather than blocking the write.
    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut values = match self.load() {
            Ok(values) => values,
            Err(ConfigError::Parse { message, .. }) => {
                warn!(
                    path = %self.path.display(),
                    error = %message,
                    "settings file is malformed, starting from an empty one"
                );
                toml::Table::new()
            }
            Err(e) => return Err(e),
        };
        values.insert(key.to_string(), toml::Value::String(value.to_string()));

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                operation: "create directory for",
                path: self.path.clone(),
                source,
            })?;
        }

        let content =
            toml::to_string_pretty(&values).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|source| ConfigError::Io {
            operation: "write",
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), key, "settings saved");
        Ok(())
    }
}

/// In-memory store, mainly for tests.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Where the current webhook URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSource {
    /// Passed explicitly for this run.
    Override,
    /// Previously saved in the store.
    Saved,
    /// Compiled-in default.
    BuildDefault,
    /// Nothing configured.
    Unset,
}

impl UrlSource {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Override => "command line",
            Self::Saved => "saved settings",
            Self::BuildDefault => "build default",
            Self::Unset => "not set",
        }
    }
}

impl fmt::Display for UrlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The webhook URL currently in effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    url: String,
    source: UrlSource,
}

impl WebhookConfig {
    /// Resolves the URL: saved value, then `build_default`, then empty.
    pub fn load<S: ConfigStore + ?Sized>(
        store: &S,
        build_default: Option<&str>,
    ) -> Result<Self, ConfigError> {
        if let Some(saved) = store.get(WEBHOOK_URL_KEY)?
            && !saved.is_empty()
        {
            return Ok(Self {
                url: saved,
                source: UrlSource::Saved,
            });
        }
        match build_default.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => Ok(Self {
                url: url.to_string(),
                source: UrlSource::BuildDefault,
            }),
            None => Ok(Self::unset()),
        }
    }

    /// Trims and stores `url`, replacing any previous value.
    pub fn save<S: ConfigStore + ?Sized>(store: &S, url: &str) -> Result<Self, ConfigError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ConfigError::EmptyUrl);
        }
        store.set(WEBHOOK_URL_KEY, url)?;
        Ok(Self {
            url: url.to_string(),
            source: UrlSource::Saved,
        })
    }

    pub fn unset() -> Self {
        Self {
            url: String::new(),
            source: UrlSource::Unset,
        }
    }

    /// Replaces the URL for this run only when `url` is given and non-blank.
    #[must_use]
    pub fn with_override(self, url: Option<&str>) -> Self {
        match url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => Self {
                url: url.to_string(),
                source: UrlSource::Override,
            },
            None => self,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn source(&self) -> UrlSource {
        self.source
    }

    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }
}
