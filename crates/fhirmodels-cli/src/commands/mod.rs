//! CLI command implementations.

pub mod definitions;
pub mod generate;
