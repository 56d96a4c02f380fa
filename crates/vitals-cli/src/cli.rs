//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use vitals_model::ExportOptions;

#[derive(Parser)]
#[command(
    name = "vitals-export",
    version,
    about = "Classify ZOLL monitor exports by course, session and mannequin",
    long_about = "Classify vital-sign records from ZOLL monitor JSON exports.\n\n\
                  Each record is assigned a course, simulation session and mannequin\n\
                  from its timestamp and device serial, then written to one table per\n\
                  (course, session, mannequin, date) group."
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

    /// Allow device serials and readings in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify monitor exports and write the export bundle.
    Process(ProcessArgs),

    /// Print the active lookup tables.
    Tables(TablesArgs),
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Monitor export JSON files or directories to search for them.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Bundle destination: a `.zip` path or a directory
    /// (default: ./vital_signs_processed_<timestamp>.zip).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write records that could not be classified to unknown_rows.csv.
    #[arg(long = "include-unknown")]
    pub include_unknown: bool,

    /// Report valid records that fall outside their session's clock schedule.
    #[arg(long = "validate-schedules")]
    pub validate_schedules: bool,

    /// Add summary.json with run and per-group counts to the bundle.
    #[arg(long = "generate-summary")]
    pub generate_summary: bool,

    /// Lookup tables TOML file to use instead of the built-in tables.
    #[arg(long = "tables", value_name = "PATH")]
    pub tables: Option<PathBuf>,

    /// Classify and report without writing the bundle.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl ProcessArgs {
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            include_unknown: self.include_unknown,
            validate_schedules: self.validate_schedules,
            generate_summary: self.generate_summary,
        }
    }
}

#[derive(Parser)]
pub struct TablesArgs {
    /// Lookup tables TOML file to print instead of the built-in tables.
    #[arg(long = "tables", value_name = "PATH")]
    pub tables: Option<PathBuf>,
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
