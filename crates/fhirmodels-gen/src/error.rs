//! Error types for the struct generator.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for generator operations.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that can occur during code generation.
///
/// Any of these is fatal for the whole run: generation is expected to
/// complete or not happen at all, never to leave partial output behind.
#[derive(Error, Debug)]
pub enum GenError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A definition file could not be parsed
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// The offending file
        path: PathBuf,
        /// The underlying JSON error
        source: serde_json::Error,
    },

    /// A type named in the required-types closure has no structure definition
    #[error("No structure definition found for required type: {0}")]
    MissingDefinition(String),

    /// A structure definition is present but unusable
    #[error("Schema error: {0}")]
    Schema(String),

    /// The required-types closure did not converge within the pass cap
    #[error("Type closure did not converge after {passes} passes")]
    FixedPointOverflow {
        /// Number of passes attempted
        passes: usize,
    },
}

impl GenError {
    /// Create a new schema error.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a new parse error for a file.
    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
