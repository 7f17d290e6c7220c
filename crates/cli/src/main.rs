// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! gwf - gravitational-wave follow-up CLI

mod adapters;
mod commands;
mod completions;
mod error;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{harvest, mock_bursts, render, run, status};
use completions::CompletionsArgs;
use gwf_core::Settings;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "gwf",
    version,
    about = "BayesWave follow-up of gravitational-wave candidates"
)]
struct Cli {
    /// Settings file (defaults to $GWF_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full follow-up for an event
    Run(run::RunArgs),
    /// Render the pipeline configuration for an event
    Render(render::RenderArgs),
    /// Harvest, report and archive an already-finished job
    Harvest(harvest::HarvestArgs),
    /// Show recorded runs
    Status(status::StatusArgs),
    /// Upload mock burst events to the tracking system
    MockBursts(mock_bursts::MockBurstsArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprint!("{}", error::GwfError::from_anyhow(&e));
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    // Completions need neither settings nor logging
    if let Commands::Completions(args) = cli.command {
        completions::generate_completions::<Cli>(args.shell);
        return Ok(());
    }

    let _guard = logging::setup_logging(cli.log_file.as_deref())?;
    let settings = Settings::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Run(args) => run::run(args, &settings).await,
        Commands::Render(args) => render::render(args, &settings).await,
        Commands::Harvest(args) => harvest::harvest(args, &settings).await,
        Commands::Status(args) => status::status(args, &settings),
        Commands::MockBursts(args) => mock_bursts::mock_bursts(args, settings).await,
        Commands::Completions(_) => Ok(()),
    }
}
