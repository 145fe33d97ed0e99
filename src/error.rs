use std::path::PathBuf;
use thiserror::Error;

use crate::dataset::Dataset;

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("Source file for {dataset} not readable at {path}: {source}")]
    MissingSource {
        dataset: Dataset,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed source for {dataset}: {reason}")]
    MalformedSource { dataset: Dataset, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset {0} has not been loaded")]
    MissingTable(Dataset),

    #[error("Column '{column}' not found in {dataset}")]
    MissingColumn { dataset: Dataset, column: String },

    #[error("Non-numeric value '{value}' in {dataset}.{column} at row {row}")]
    NonNumeric {
        dataset: Dataset,
        column: String,
        row: usize,
        value: String,
    },

    #[error("Destination directory {path} unavailable: {source}")]
    DestinationUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid pipeline plan: {0}")]
    InvalidPlan(String),
}

pub type Result<T> = std::result::Result<T, CleanerError>;
