//! # CLI Error Type
//!
//! Everything that can stop a `swarna` command.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  read file ──► Io            parse JSON ──► Json                        │
//! │  swarna.toml ──► Toml / InvalidConfig                                   │
//! │  rate lookup, charge codes ──► Core (CoreError from swarna-core)        │
//! │                                                                         │
//! │  main() prints the message and exits with exit_code()                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use swarna_core::{CoreError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A product has neither a category to look up nor an explicit rate.
    #[error("Product {0} has no category and no pricePerGram")]
    MissingCategory(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::Core(err.into())
    }
}

impl CliError {
    /// Process exit code: 2 for bad input or config, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Json(_)
            | CliError::Toml(_)
            | CliError::InvalidConfig(_)
            | CliError::MissingCategory(_)
            | CliError::Core(CoreError::Validation(_))
            | CliError::Core(CoreError::UnknownChargeType(_)) => 2,
            _ => 1,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
