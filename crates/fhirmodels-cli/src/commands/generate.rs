//! The `generate` command: definitions directory in, Rust sources out.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use fhirmodels_gen::{DefinitionRegistry, generate_all};

/// Generate Rust source files from a directory of FHIR definitions.
#[derive(Args)]
pub struct GenerateCommand {
    /// Input directory of definition JSON files
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for generated sources
    #[arg(short, long)]
    pub output: PathBuf,
}

impl GenerateCommand {
    /// Execute the command.
    pub fn execute(&self) -> Result<()> {
        let registry = DefinitionRegistry::load_dir(&self.input).with_context(|| {
            format!("Failed to load definitions from {}", self.input.display())
        })?;

        let generated = generate_all(&registry).context("Code generation failed")?;

        for diagnostic in &generated.diagnostics {
            warn!("{diagnostic}");
        }

        fs::create_dir_all(&self.output).with_context(|| {
            format!("Failed to create output directory {}", self.output.display())
        })?;
        for file in &generated.files {
            let path = self.output.join(&file.path);
            fs::write(&path, &file.content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }

        info!(
            files = generated.files.len(),
            resources = generated.resource_names.len(),
            "generation complete"
        );
        println!(
            "Generated {} files in {}",
            generated.files.len(),
            self.output.display()
        );
        Ok(())
    }
}
