//! Command handlers for the lead intake CLI.
//!
//! Each `run_*` function does the work for one subcommand and returns a
//! report; printing is left to `summary`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{Instrument, info, info_span, trace, warn};

use intake_cli::logging::redact_value;
use intake_cli::session::{LoadOutcome, Session};
use intake_ingest::IngestError;
use intake_model::{REQUIRED_FIELDS, RequiredFields};
use intake_output::{DirectorySink, StdoutSink, write_sample};
use intake_submit::{
    BUILD_DEFAULT_URL, FileConfigStore, WebhookClient, WebhookConfig, parse_webhook_url,
};

use crate::cli::{CheckArgs, ConfigCommand, SampleArgs, SendArgs};
use crate::summary::{apply_table_style, header_cell};
use crate::types::{CheckReport, SendReport};

pub fn open_store(config_path: Option<&Path>) -> FileConfigStore {
    match config_path {
        Some(path) => FileConfigStore::at(path),
        None => FileConfigStore::open_default(),
    }
}

fn open_session(config_path: Option<&Path>) -> Result<Session<FileConfigStore>> {
    let client = WebhookClient::new().context("create webhook client")?;
    Ok(Session::new(open_store(config_path), client))
}

pub fn run_check(args: &CheckArgs, config_path: Option<&Path>) -> Result<CheckReport> {
    let span = info_span!("check", file = %args.file.display());
    let _guard = span.enter();
    let mut session = open_session(config_path)?;
    Ok(load_file(&mut session, &args.file, args.content_type.clone()))
}

pub async fn run_send(args: &SendArgs, config_path: Option<&Path>) -> Result<SendReport> {
    let span = info_span!("send", file = %args.file.display());
    async {
        let mut session =
            open_session(config_path)?.with_webhook_override(args.webhook_url.as_deref());
        let check = load_file(&mut session, &args.file, args.content_type.clone());
        let webhook_source = session.webhook().source().to_string();
        if !check.is_ready() {
            info!(outcome = check.outcome.kind(), "file not sent");
            return Ok(SendReport {
                check,
                webhook_source,
                submission: None,
            });
        }
        if let Some(file) = session.current() {
            for (index, row) in file.table.rows.iter().enumerate() {
                trace!(
                    row = index + 1,
                    email = redact_value(row.get("email").unwrap_or_default()),
                    company = redact_value(row.get("company name").unwrap_or_default()),
                    "row queued"
                );
            }
        }
        let submission = session.send().await;
        Ok(SendReport {
            check,
            webhook_source,
            submission: Some(submission),
        })
    }
    .instrument(span)
    .await
}

fn load_file(
    session: &mut Session<FileConfigStore>,
    path: &Path,
    content_type: Option<String>,
) -> CheckReport {
    let outcome = session.select_path(path, content_type);
    let (file_size, row_count) = match (&outcome, session.current()) {
        (LoadOutcome::Invalid(_) | LoadOutcome::Ready(_), Some(file)) => {
            (Some(file.size), Some(file.table.row_count()))
        }
        (LoadOutcome::Rejected(IngestError::FileTooLarge { size, .. }), _) => (Some(*size), None),
        _ => (std::fs::metadata(path).ok().map(|m| m.len()), None),
    };
    CheckReport {
        file_name: display_name(path),
        file_size,
        row_count,
        outcome,
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Writes the sample file and returns where it went (`None` for stdout).
pub fn run_sample(args: &SampleArgs) -> Result<Option<PathBuf>> {
    if args.stdout {
        write_sample(&StdoutSink).context("write sample to stdout")?;
        return Ok(None);
    }
    let dir = args.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let sink = DirectorySink::new(&dir);
    let path = write_sample(&sink)
        .with_context(|| format!("write sample into {}", dir.display()))?;
    Ok(Some(path))
}

pub fn run_fields() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Field")]);
    apply_table_style(&mut table);
    for (index, field) in RequiredFields.iter().enumerate() {
        table.add_row(vec![(index + 1).to_string(), field.to_string()]);
    }
    println!("{table}");
    println!("{} required fields", REQUIRED_FIELDS.len());
    Ok(())
}

pub fn run_config(command: &ConfigCommand, config_path: Option<&Path>) -> Result<()> {
    let store = open_store(config_path);
    match command {
        ConfigCommand::Show => {
            let config = WebhookConfig::load(&store, BUILD_DEFAULT_URL)
                .with_context(|| format!("load settings from {}", store.path().display()))?;
            let mut table = Table::new();
            table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
            apply_table_style(&mut table);
            let url = if config.is_configured() {
                config.url().to_string()
            } else {
                "-".to_string()
            };
            table.add_row(vec!["Webhook URL".to_string(), url]);
            table.add_row(vec!["Source".to_string(), config.source().to_string()]);
            table.add_row(vec![
                "Settings file".to_string(),
                store.path().display().to_string(),
            ]);
            println!("{table}");
        }
        ConfigCommand::Set { url } => {
            if let Err(error) = parse_webhook_url(url) {
                warn!(%error, "saving a webhook URL that cannot be used for sending");
            }
            let config = WebhookConfig::save(&store, url)
                .with_context(|| format!("save settings to {}", store.path().display()))?;
            info!(path = %store.path().display(), "webhook URL saved");
            println!("Webhook URL set to {}", config.url());
        }
        ConfigCommand::Path => println!("{}", store.path().display()),
    }
    Ok(())
}
