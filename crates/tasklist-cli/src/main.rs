use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::{Cli, Commands};
use tasklist_cli::{Session, Settings};

fn main() -> Result<()> {
    // Initialize tracing, on stderr so it stays out of the session output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasklist=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            println!("Tasklist - type 'help' for commands, 'quit' to leave.");
            println!("Tasks live only for this session.");

            let stdin = io::stdin();
            let stdout = io::stdout();
            Session::new(settings, stdin.lock(), stdout.lock())
                .with_prompt("tasklist> ")
                .run()
        }

        Commands::Run { script, yes } => {
            let file = File::open(&script)
                .with_context(|| format!("Failed to open script {}", script.display()))?;

            tracing::info!("Running script {}", script.display());

            let stdout = io::stdout();
            Session::new(settings, BufReader::new(file), stdout.lock())
                .assume_yes(yes)
                .run()
        }
    }
}
