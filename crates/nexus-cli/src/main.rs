mod app;
mod doctor;

use anyhow::Result;
use app::App;
use clap::{Parser, Subcommand};
use nexus_core::OutputFormatter;
use std::io;
use std::process::ExitCode;
use tracing::debug;

/// Nexus - your central connection point for development tools.
#[derive(Debug, Parser)]
#[command(name = "nexus", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the Nexus version.
    Version,
    /// Check configuration, repository detection and external tools.
    Doctor,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            OutputFormatter::new().print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    debug!(?command, "running command");
    let mut stdout = io::stdout().lock();
    match command {
        Command::Version => app::print_version(&mut stdout),
        Command::Doctor => {
            let app = App::new();
            doctor::run(&app, &mut stdout)
        }
    }
}
