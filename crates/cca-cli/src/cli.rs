//! CLI argument definitions for `cca-tidy`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use cca_cli::logging::LogFormat;
use cca_model::RoundingMode;

#[derive(Parser)]
#[command(
    name = "cca-tidy",
    version,
    about = "Tidy waste statistics and survey microdata into analysis-ready CSV files",
    long_about = "Tidy waste statistics and survey microdata into analysis-ready CSV files.\n\n\
                  Downloads Eurostat municipal waste and packaging recycling series,\n\
                  joins them by region and year, and aggregates the optional ESOC\n\
                  survey microdata into weighted percentage tables."
)]
pub struct Cli {
    /// Products to build (default: all).
    #[command(subcommand)]
    pub command: Option<Command>,

    /// TOML configuration file.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Data directory for inputs and outputs (overrides the config file).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Read datasets from a directory of downloaded files instead of Eurostat.
    #[arg(long = "source-dir", value_name = "DIR", global = true)]
    pub source_dir: Option<PathBuf>,

    /// Rounding of category shares (overrides the config file).
    #[arg(long = "rounding", value_enum, global = true)]
    pub rounding: Option<RoundingArg>,

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
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Retrieve both Eurostat series and write them with their join.
    Eurostat,

    /// Aggregate the ESOC survey microdata, if present.
    Esoc,

    /// Run eurostat, then esoc.
    All,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RoundingArg {
    Plain,
    LargestRemainder,
}

impl From<RoundingArg> for RoundingMode {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::Plain => Self::Plain,
            RoundingArg::LargestRemainder => Self::LargestRemainder,
        }
    }
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

impl From<LogLevelArg> for LevelFilter {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
