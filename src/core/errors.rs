use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for domain/storage/report layers.
#[derive(Error, Debug)]
pub enum MovieError {
    #[error("Movie not found: {0}")]
    MovieNotFound(String),
    #[error("Collection is empty")]
    EmptyCollection,
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Enrichment unavailable: {0}")]
    EnrichmentUnavailable(String),
}

pub type Result<T> = StdResult<T, MovieError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] MovieError),
    #[error("Input error: {0}")]
    Input(String),
}

impl From<std::io::Error> for MovieError {
    fn from(err: std::io::Error) -> Self {
        MovieError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for MovieError {
    fn from(err: serde_json::Error) -> Self {
        MovieError::StorageError(err.to_string())
    }
}

impl From<csv::Error> for MovieError {
    fn from(err: csv::Error) -> Self {
        MovieError::StorageError(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Input(err.to_string())
    }
}
