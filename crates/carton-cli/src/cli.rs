//! CLI argument definitions for the carton segregator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "carton-segregator",
    version,
    about = "Carton Segregator - verify scanned cartons against their pallet group",
    long_about = "Select a shipment invoice (C-INV) from the supplier packing list and scan\n\
                  container barcodes. Each carton is checked against the pallet group\n\
                  derived from its style (VPN) and colour (DIFF_1)."
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

    /// Settings file (default: the user config directory's settings.toml).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Concept (brand profile) whose packing list to use.
    #[arg(long = "concept", value_name = "NAME", global = true)]
    pub concept: Option<String>,

    /// Packing list file or URL, overriding the concept's source.
    #[arg(long = "source", value_name = "PATH_OR_URL", global = true)]
    pub source: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List configured concepts and their packing list sources.
    Concepts,

    /// List the invoices (C-INV) in the packing list.
    Invoices,

    /// Print the pallet allocation for an invoice.
    Pallets(PalletsArgs),

    /// Verify scanned container codes for an invoice.
    ///
    /// With no codes, reads one code per line from stdin until `:q` or EOF.
    Scan(ScanArgs),
}

#[derive(Parser)]
pub struct PalletsArgs {
    /// Invoice number (C-INVC-NO).
    #[arg(value_name = "C_INV")]
    pub invoice: String,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct ScanArgs {
    /// Invoice number (C-INVC-NO).
    #[arg(value_name = "C_INV")]
    pub invoice: String,

    /// Container codes to verify. Omit to scan interactively.
    #[arg(value_name = "CODE")]
    pub codes: Vec<String>,

    /// Output format for non-interactive scans.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
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
