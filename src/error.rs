use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the crop dataset at startup.
///
/// Every variant is fatal: the dashboard refuses to serve requests
/// without a complete dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The dataset file could not be opened or read.
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV stream itself is malformed (ragged rows, bad UTF-8, ...).
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks one of the required columns.
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// A required column appears more than once in the header row.
    #[error("Column '{0}' appears more than once")]
    DuplicateColumn(String),

    /// A numeric cell is empty, unparsable or not finite.
    #[error("Line {line}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },

    /// A row carries an empty crop label.
    #[error("Line {line}: empty crop label")]
    EmptyLabel { line: u64 },
}

/// A feature name outside the seven recognised columns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown feature '{0}' (expected one of N, P, K, temperature, humidity, ph, rainfall)")]
pub struct InvalidFeatureError(pub String);
