//! rankplot - Main Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use rankplot_cli::{commands, server, Args, Command};
use rankplot_common::init_logging;
use rankplot_config::{Config, ConfigLoader};
use std::path::Path;
use tracing::info;

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => ConfigLoader::load().context("failed to load configuration")?,
    };

    args.apply_to(&mut config);
    config
        .validate_all()
        .context("invalid command line override")?;
    Ok(config)
}

async fn run(args: Args, config: Config) -> Result<()> {
    match args.command {
        Command::Render(_) => {
            commands::render(&config).context("failed to render report")?;
        }
        Command::Simulate(simulate) => {
            let output = simulate.output.as_deref().unwrap_or(&config.input.path);
            let params = config.simulation.clone();
            let output = Path::new(output).to_path_buf();
            tokio::task::spawn_blocking(move || commands::simulate(&params, &output))
                .await
                .context("simulation task panicked")?
                .context("simulation failed")?;
        }
        Command::Serve(_) => {
            server::serve(&config.server.bind).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    init_logging(config.logging.to_logging_config())
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting rankplot");

    run(args, config).await
}
