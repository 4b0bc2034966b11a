//! The `definitions` command: emit the flat resource-kind name list.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use fhirmodels_gen::{DefinitionRegistry, definitions_list};

/// Write the flat list of generated resource-kind names to a file.
#[derive(Args)]
pub struct DefinitionsCommand {
    /// Input directory of definition JSON files
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file for the definitions list
    #[arg(short = 'd', long)]
    pub definitions: PathBuf,
}

impl DefinitionsCommand {
    /// Execute the command.
    pub fn execute(&self) -> Result<()> {
        let registry = DefinitionRegistry::load_dir(&self.input).with_context(|| {
            format!("Failed to load definitions from {}", self.input.display())
        })?;

        let list = definitions_list(&registry);
        fs::write(&self.definitions, &list).with_context(|| {
            format!("Failed to write {}", self.definitions.display())
        })?;

        info!(
            names = list.lines().count(),
            "definitions list written"
        );
        println!("Wrote definitions list to {}", self.definitions.display());
        Ok(())
    }
}
