mod cli;
mod config;
mod error;
mod export;
mod graph;
mod ingest;
mod prompt;
mod registry;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing - only show warnings by default, use RUST_LOG=info for more detail
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init { force, data_dir } => {
            cli::commands::init::run(config_path, force, &data_dir)?;
        }
        Commands::Build { format, output } => {
            cli::commands::build::run(config_path, format, output)?;
        }
        Commands::Prompt { sense } => {
            cli::commands::prompt::run_single(config_path, &sense)?;
        }
        Commands::Prompts {
            output,
            min_degree,
            all_senses,
            limit,
        } => {
            cli::commands::prompt::run_batch(config_path, output, min_degree, all_senses, limit)?;
        }
        Commands::Stats => {
            cli::commands::stats::run(config_path)?;
        }
        Commands::Edges { types } => {
            cli::commands::edges::run(config_path, &types)?;
        }
        Commands::Neighbors { sense } => {
            cli::commands::neighbors::run(config_path, &sense)?;
        }
    }

    Ok(())
}
