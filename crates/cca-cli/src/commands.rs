use anyhow::Result;
use tracing::info;

use cca_cli::config::{PipelineConfig, SourceConfig};
use cca_cli::pipeline::{run_all, run_microdata, run_statistical_series};
use cca_cli::types::RunSummary;

use crate::cli::{Cli, Command};

/// Loads the configuration file (if any) and applies CLI overrides.
pub fn resolve_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir.clone_from(dir);
    }
    if let Some(dir) = &cli.source_dir {
        config.source = SourceConfig::Directory { path: dir.clone() };
    }
    if let Some(rounding) = cli.rounding {
        config.microdata.rounding = rounding.into();
    }
    config.validate()?;
    Ok(config)
}

pub fn run_command(command: Command, config: &PipelineConfig) -> Result<RunSummary> {
    info!(?command, data_dir = %config.data_dir.display(), "starting run");
    match command {
        Command::Eurostat => {
            let source = config.source.build()?;
            run_statistical_series(config, source.as_ref())
        }
        Command::Esoc => run_microdata(config),
        Command::All => {
            let source = config.source.build()?;
            run_all(config, source.as_ref())
        }
    }
}
