//! # fhirmodels CLI
//!
//! Command-line interface for the FHIR struct generator.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{Level, info};

mod commands;

use commands::{definitions::DefinitionsCommand, generate::GenerateCommand};

#[derive(Parser)]
#[command(name = "fhirmodels")]
#[command(about = "Generate Rust data models from FHIR definitions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Rust source files from a directory of FHIR definitions
    Generate(GenerateCommand),
    /// Write the flat list of generated resource-kind names
    Definitions(DefinitionsCommand),
}

fn main() -> Result<()> {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("Starting fhirmodels CLI");

    match cli.command {
        Commands::Generate(cmd) => cmd.execute(),
        Commands::Definitions(cmd) => cmd.execute(),
    }
}
