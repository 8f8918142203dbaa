use std::{io, path::PathBuf};

use thiserror::Error;

use railroad::RailroadError;

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Anything that stops the CLI from producing its output.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid diagram description: {0}")]
    Source(#[from] serde_json::Error),

    #[error(transparent)]
    Diagram(#[from] RailroadError),
}
