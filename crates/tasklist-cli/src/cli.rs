use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "Tasklist - an in-memory to-do list for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Settings file (TOML)
    #[arg(long, env = "TASKLIST_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session (default)
    Shell,

    /// Run session commands from a file, one per line
    Run {
        /// Script path
        script: PathBuf,

        /// Answer yes to every delete confirmation
        #[arg(short, long)]
        yes: bool,
    },
}
