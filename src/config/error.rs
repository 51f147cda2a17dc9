//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::constants::WeightsError;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable could not be parsed as the expected number.
    #[error("failed to parse {name}='{value}': {reason}")]
    ParseError {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// A setting parsed but is outside its valid range.
    #[error("invalid {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },

    /// The scoring weights are unusable.
    #[error("invalid scoring weights: {0}")]
    Weights(#[from] WeightsError),

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },
}
