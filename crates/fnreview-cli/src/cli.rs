//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use fnreview_config::StrategyKind;

#[derive(Parser)]
#[command(
    name = "fnreview",
    version,
    about = "Extract and reconcile function review answers from compliance documents",
    long_about = "Extract per-function answers (technical availability, employer deployment,\n\
                  monitoring control, AI involvement) from document tables or text, and\n\
                  reconcile them with AI assessments and reviewer overrides."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Allow document text (cell contents, notes) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract function records from a document.
    Extract(ExtractArgs),

    /// Reconcile document, AI and manual values from a JSON inputs file.
    Reconcile(ReconcileArgs),

    /// Validate a configuration file.
    CheckConfig(CheckConfigArgs),

    /// Print the built-in configuration as TOML.
    DefaultConfig,
}

#[derive(Args)]
pub struct ExtractArgs {
    /// Document to read (.json, .txt, .md or .csv).
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Text file used as the document body when DOCUMENT is a CSV table.
    #[arg(long = "text", value_name = "PATH")]
    pub text: Option<PathBuf>,

    /// Configuration file (default: built-in configuration).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Extraction mode, overriding the configuration.
    #[arg(long = "mode", value_enum)]
    pub mode: Option<ModeArg>,

    /// Strategy order for auto mode, e.g. `table,exact`.
    #[arg(long = "order", value_delimiter = ',', value_parser = parse_strategy)]
    pub order: Vec<StrategyKind>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct ReconcileArgs {
    /// JSON file with document, AI and manual values per function.
    #[arg(value_name = "INPUTS")]
    pub inputs: PathBuf,

    /// Configuration file providing review options.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Mark functions that are not available while one of their sub-questions is.
    #[arg(long = "flag-subquestions")]
    pub flag_subquestions: bool,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct CheckConfigArgs {
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

fn parse_strategy(value: &str) -> Result<StrategyKind, String> {
    value.parse()
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Auto,
    TableOnly,
    RuleOnly,
    PhraseOnly,
}

impl ModeArg {
    pub fn config_name(self) -> &'static str {
        match self {
            ModeArg::Auto => "auto",
            ModeArg::TableOnly => "table_only",
            ModeArg::RuleOnly => "rule_only",
            ModeArg::PhraseOnly => "phrase_only",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
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
