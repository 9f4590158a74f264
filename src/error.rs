//! Error type shared by every pipeline stage.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Every failure a stage can report. None of them is retried internally.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("malformed input {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },

    #[error("schema mismatch in table {index}: expected [{expected}], found [{found}]")]
    SchemaMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error(
        "cleaning strategy '{strategy}' removed all {columns} columns \
         ({rows} rows, threshold {threshold})"
    )]
    EmptyResult {
        strategy: String,
        threshold: f64,
        rows: usize,
        columns: usize,
    },

    #[error("unsupported cleaning strategy '{value}', expected 'drop' or 'impute'")]
    UnsupportedStrategy { value: String },

    #[error("no inputs: {context}")]
    NoInputs { context: String },

    #[error("invalid table: {reason}")]
    InvalidTable { reason: String },

    #[error("invalid training data ({rows} rows x {columns} columns): {reason}")]
    InvalidTrainingData {
        rows: usize,
        columns: usize,
        reason: String,
    },

    #[error("fit failed ({rows} rows, {features} features): {reason}")]
    FitFailed {
        rows: usize,
        features: usize,
        reason: String,
    },

    #[error("branch '{strategy}' panicked: {message}")]
    BranchPanicked { strategy: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl PipelineError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_table(reason: impl Into<String>) -> Self {
        Self::InvalidTable {
            reason: reason.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<bincode::Error> for PipelineError {
    fn from(err: bincode::Error) -> Self {
        PipelineError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Serialization(err.to_string())
    }
}
