//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use m720_cli::source::DeclarationFormat;

#[derive(Parser)]
#[command(
    name = "m720",
    version,
    about = "Modelo 720 declarations - inspect, validate and convert",
    long_about = "Read, validate and convert Modelo 720 declarations of foreign assets.\n\n\
                  Works with the 500-column fixed-width filing format, the\n\
                  two-section CSV format used for editing and JSON exports."
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

    /// Prefix log lines with a timestamp (JSON logs always carry one).
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the emitting module path in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the header and a table of detail records.
    Show(InputArgs),

    /// Check a declaration and list every violation.
    Validate(ValidateArgs),

    /// Convert a declaration between the fixed-width, CSV and JSON formats.
    Convert(ConvertArgs),

    /// Write a declaration as JSON.
    Export(ExportArgs),
}

/// Input file selection shared by every command.
#[derive(Args)]
pub struct InputArgs {
    /// Declaration file (.720 fixed-width, .csv or .json).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Input format (inferred from the file extension when omitted).
    #[arg(long = "format", value_enum)]
    pub format: Option<DeclarationFormat>,

    /// Text encoding of fixed-width files.
    #[arg(long = "encoding", value_name = "LABEL", default_value = "iso-8859-15")]
    pub encoding: String,
}

#[derive(Parser)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the result as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Destination file.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Output format (inferred from the output extension when omitted).
    #[arg(long = "to", value_enum)]
    pub to: Option<DeclarationFormat>,

    /// Text encoding of a fixed-width output (defaults to --encoding).
    #[arg(long = "output-encoding", value_name = "LABEL")]
    pub output_encoding: Option<String>,
}

#[derive(Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write JSON to this file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Emit single-line JSON.
    #[arg(long = "compact")]
    pub compact: bool,
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
