//! CLI argument definitions for lead intake.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "lead-intake",
    version,
    about = "Validate lead CSV uploads and forward them to a webhook",
    long_about = "Validate lead CSV uploads and forward them to a webhook.\n\n\
                  A file is checked for type and size, parsed, and compared \
                  against the required lead fields.\n\
                  Only files with every required field can be sent."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow lead values (emails, names) to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file to use instead of the platform default.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check a CSV file against the required lead fields.
    Check(CheckArgs),

    /// Check a CSV file and send it to the webhook when it is valid.
    Send(SendArgs),

    /// Write a sample CSV containing only the required header row.
    Sample(SampleArgs),

    /// List the required lead fields in order.
    Fields,

    /// Inspect or change the saved webhook URL.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// CSV file to check.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Media type reported for the file (defaults to the extension check).
    #[arg(long = "content-type", value_name = "MIME")]
    pub content_type: Option<String>,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Parser)]
pub struct SendArgs {
    /// CSV file to send.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Media type reported for the file (defaults to the extension check).
    #[arg(long = "content-type", value_name = "MIME")]
    pub content_type: Option<String>,

    /// Webhook URL for this run; the saved URL is left untouched.
    #[arg(long = "webhook-url", value_name = "URL", env = "LEAD_INTAKE_WEBHOOK_URL")]
    pub webhook_url: Option<String>,
}

#[derive(Parser)]
pub struct SampleArgs {
    /// Directory to write `sample.csv` into (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR", conflicts_with = "stdout")]
    pub output_dir: Option<PathBuf>,

    /// Print the sample to stdout instead of writing a file.
    #[arg(long = "stdout")]
    pub stdout: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the webhook URL in effect and where it came from.
    Show,

    /// Save a new webhook URL, replacing any previous one.
    Set {
        /// Webhook URL to save.
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Print the settings file location.
    Path,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_check_defaults_to_table() {
        let cli = Cli::try_parse_from(["lead-intake", "check", "leads.csv"]).unwrap();
        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.file, PathBuf::from("leads.csv"));
                assert_eq!(args.format, ReportFormatArg::Table);
                assert!(args.content_type.is_none());
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_sample_output_dir_conflicts_with_stdout() {
        let result =
            Cli::try_parse_from(["lead-intake", "sample", "--stdout", "--output-dir", "out"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "lead-intake",
            "config",
            "show",
            "--config",
            "/tmp/settings.toml",
            "--log-data",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/settings.toml")));
        assert!(cli.log_data);
        assert!(matches!(cli.command, Command::Config(ConfigCommand::Show)));
    }
}
