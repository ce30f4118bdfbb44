//! CLI error types.

use thiserror::Error;
use typeshift_core::migration::MigrationError;

/// Errors surfaced to the operator.
#[derive(Debug, Error)]
pub enum CliError {
    /// Store or catalog error.
    #[error("{0}")]
    Core(#[from] typeshift_core::Error),

    /// Migration aborted.
    #[error("migration failed: {0}")]
    Migration(#[from] MigrationError),

    /// Reading input or writing output failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input or output.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The confirmation prompt failed.
    #[error("prompt error: {0}")]
    Prompt(String),

    /// Input that parsed but cannot be used.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<dialoguer::Error> for CliError {
    fn from(e: dialoguer::Error) -> Self {
        CliError::Prompt(e.to_string())
    }
}
