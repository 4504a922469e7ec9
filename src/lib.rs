pub mod cli;
pub mod config;
pub mod telemetry;

pub use cli::{Cli, Commands, LogFormat};
pub use config::load_config;

use std::path::PathBuf;

use anyhow::Context;
use scenario_generator::{run_scenario, write_behaviours};
use scenario_packaging::{write_build_context, ContainerRecipe};
use tracing::info;

/// Executes a parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Scenario { id, output, force } => {
            let base = output.unwrap_or_else(|| PathBuf::from(&config.output.dir));
            let manifest = run_scenario(&config, id, &base, force)
                .await
                .with_context(|| format!("generating scenario {id}"))?;
            info!(
                scenario_id = manifest.scenario_id,
                seed = manifest.seed,
                agents = manifest.agents,
                "Scenario complete"
            );
        }
        Commands::Behaviours { output } => {
            let base = output.unwrap_or_else(|| PathBuf::from(&config.output.dir));
            write_behaviours(&base, &config.output)
                .await
                .context("writing behaviours")?;
        }
        Commands::Dockerfile { out } => {
            let recipe = ContainerRecipe::from(&config.container);
            recipe.validate()?;
            match out {
                Some(dir) => {
                    write_build_context(&dir, &recipe)?;
                }
                None => print!("{}", recipe.dockerfile()),
            }
        }
    }

    Ok(())
}
