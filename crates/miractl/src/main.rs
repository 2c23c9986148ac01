//! Mira Control - console front end for the Mira triage assistant
//!
//! Loads the dataset, trains the classifier, and drives elicitation
//! sessions through the engine's event contract.

mod chat;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "miractl")]
#[command(about = "Mira - interactive symptom triage assistant", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive triage chat (default)
    Chat,

    /// Look up precautions, severity, and description for a disease
    Info {
        /// Disease name (case-insensitive)
        disease: String,
    },

    /// Score the classifier against the held-out test rows
    Evaluate {
        /// Emit the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => chat::run(cli.config.as_deref()),
        Commands::Info { disease } => commands::info(cli.config.as_deref(), &disease),
        Commands::Evaluate { json } => commands::evaluate(cli.config.as_deref(), json),
        Commands::Config => commands::show_config(cli.config.as_deref()),
    }
}
