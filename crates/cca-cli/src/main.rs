//! Circular analytics data tidying CLI.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use cca_cli::logging::{LogConfig, init_logging};

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{resolve_config, run_command};
use crate::summary::print_summary;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }

    let command = cli.command.unwrap_or(Command::All);
    let result = resolve_config(&cli).and_then(|config| run_command(command, &config));
    match result {
        Ok(summary) => {
            if !summary.products.is_empty() {
                print_summary(&summary);
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Maps the logging flags onto a [`LogConfig`].
///
/// `--log-level` beats `-v`/`-q`; with neither, `RUST_LOG` is honoured.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit = cli.log_level.map(LevelFilter::from);
    LogConfig {
        level_filter: explicit.unwrap_or_else(|| cli.verbosity.tracing_level_filter()),
        use_env_filter: explicit.is_none() && !cli.verbosity.is_present(),
        with_ansi: ansi_enabled(cli),
        format: cli.log_format.into(),
        log_file: cli.log_file.clone(),
        ..LogConfig::default()
    }
}

/// ANSI escapes only go to an interactive stderr unless forced.
fn ansi_enabled(cli: &Cli) -> bool {
    match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cca_cli::logging::LogFormat;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cca-tidy").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_log_level_flag_overrides_verbosity() {
        let config = log_config_from_cli(&parse(&["-q", "--log-level", "debug"]));
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn test_verbose_flag_raises_level() {
        let config = log_config_from_cli(&parse(&["-v"]));
        assert_eq!(config.level_filter, LevelFilter::INFO);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn test_defaults_defer_to_rust_log() {
        let config = log_config_from_cli(&parse(&["--log-format", "json"]));
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_color_never_and_log_file_disable_ansi() {
        assert!(!log_config_from_cli(&parse(&["--color", "never"])).with_ansi);
        assert!(!log_config_from_cli(&parse(&["--log-file", "run.log"])).with_ansi);
        assert!(log_config_from_cli(&parse(&["--color", "always"])).with_ansi);
    }
}
