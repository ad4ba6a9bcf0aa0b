//! File-backed webhook URL settings.

use intake_submit::{
    ConfigError, ConfigStore, FileConfigStore, UrlSource, WEBHOOK_URL_KEY, WebhookConfig,
};

#[test]
fn missing_file_reads_as_unset() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileConfigStore::at(dir.path().join("settings.toml"));
    assert_eq!(store.get(WEBHOOK_URL_KEY).unwrap(), None);
    let config = WebhookConfig::load(&store, None).unwrap();
    assert_eq!(config.source(), UrlSource::Unset);
}

#[test]
fn save_creates_file_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");
    let store = FileConfigStore::at(&path);

    WebhookConfig::save(&store, "https://hooks.example.com/a").unwrap();
    WebhookConfig::save(&store, "https://hooks.example.com/b").unwrap();

    let reopened = FileConfigStore::at(&path);
    let config = WebhookConfig::load(&reopened, Some("https://default.example")).unwrap();
    assert_eq!(config.url(), "https://hooks.example.com/b");
    assert_eq!(config.source(), UrlSource::Saved);

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("webhook_url"));
}

#[test]
fn unrelated_keys_survive_a_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "theme = \"dark\"\n").unwrap();
    let store = FileConfigStore::at(&path);

    WebhookConfig::save(&store, "https://hooks.example.com/a").unwrap();
    assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
}

#[test]
fn malformed_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "webhook_url = [not toml").unwrap();
    let store = FileConfigStore::at(&path);
    assert!(matches!(
        store.get(WEBHOOK_URL_KEY),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn save_replaces_a_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "webhook_url = [broken").unwrap();
    let store = FileConfigStore::at(&path);

    let saved = WebhookConfig::save(&store, "https://hooks.example.com/x").unwrap();
    assert_eq!(saved.url(), "https://hooks.example.com/x");

    let config = WebhookConfig::load(&FileConfigStore::at(&path), None).unwrap();
    assert_eq!(config.url(), "https://hooks.example.com/x");
    assert_eq!(config.source(), UrlSource::Saved);
}

#[test]
fn save_keeps_non_string_keys_and_replaces_non_string_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "webhook_url = 5\nretries = 3\n\n[window]\nwidth = 800\n").unwrap();
    let store = FileConfigStore::at(&path);
    assert_eq!(store.get(WEBHOOK_URL_KEY).unwrap(), None);

    WebhookConfig::save(&store, "https://hooks.example.com/y").unwrap();
    assert_eq!(
        store.get(WEBHOOK_URL_KEY).unwrap().as_deref(),
        Some("https://hooks.example.com/y")
    );

    let table: toml::Table = std::fs::read_to_string(&path).unwrap().parse().unwrap();
    assert_eq!(table["retries"].as_integer(), Some(3));
    assert_eq!(table["window"]["width"].as_integer(), Some(800));
}
