//! Command line arguments

use clap::{Args as ClapArgs, Parser, Subcommand};
use rankplot_config::Config;
use std::path::PathBuf;

/// Ranking exam simulation and report charts
#[derive(Parser, Debug)]
#[command(name = "rankplot", author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, env = "RANKPLOT_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Log level, overrides the configured one
    #[arg(short, long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the three-panel report from a results document
    Render(RenderArgs),
    /// Run the ranking simulation and write a results document
    Simulate(SimulateArgs),
    /// Serve simulations over HTTP
    Serve(ServeArgs),
}

#[derive(ClapArgs, Debug, Default)]
pub struct RenderArgs {
    /// Results document to read
    #[arg(short, long)]
    pub input: Option<String>,

    /// Image to write (.png or .svg)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Label language (en, zh)
    #[arg(long)]
    pub locale: Option<String>,

    /// How the candidate is found in each ranking (last, by-rank)
    #[arg(long)]
    pub locator: Option<String>,
}

#[derive(ClapArgs, Debug, Default)]
pub struct SimulateArgs {
    /// Where to write the results document, defaults to the configured input path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of simulations, overrides the configured count
    #[arg(short = 'n', long)]
    pub simulations: Option<u32>,
}

#[derive(ClapArgs, Debug, Default)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(short, long)]
    pub bind: Option<String>,
}

impl Args {
    /// Fold command line flags into a loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(level) = &self.log_level {
            config.logging.level = level.trim().to_ascii_lowercase();
        }

        match &self.command {
            Command::Render(render) => {
                if let Some(input) = &render.input {
                    config.input.path = input.clone();
                }
                if let Some(output) = &render.output {
                    config.report.output = output.clone();
                }
                if let Some(locale) = &render.locale {
                    config.report.locale = locale.trim().to_ascii_lowercase();
                }
                if let Some(locator) = &render.locator {
                    config.report.candidate_locator = locator.trim().to_ascii_lowercase();
                }
            }
            Command::Simulate(simulate) => {
                if let Some(seed) = simulate.seed {
                    config.simulation.seed = Some(seed);
                }
                if let Some(simulations) = simulate.simulations {
                    config.simulation.simulations = simulations;
                }
            }
            Command::Serve(serve) => {
                if let Some(bind) = &serve.bind {
                    config.server.bind = bind.clone();
                }
            }
        }
    }
}
