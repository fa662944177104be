//! Error types for the training pipeline. Every variant is fatal for the run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Dataset path missing, unreadable, or not the expected CSV shape
    #[error("cannot read dataset {path}: {reason}")]
    InputUnreadable { path: PathBuf, reason: String },

    /// A per-question sequence cell is not a bracketed list of numbers
    #[error("row {row}: malformed {column} value {value:?}: {reason}")]
    MalformedSequenceField {
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },

    /// A scalar cell that must be an integer is not one
    #[error("row {row}: invalid {column} value {value:?}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// Label missing or not 0/1
    #[error("row {row}: label must be 0 or 1, got {value:?}")]
    InvalidLabel { row: usize, value: String },

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Classifier misuse: predicting before fit, or a feature-width mismatch
    #[error("model error: {0}")]
    Model(String),

    #[error("cannot write model artifact {path}: {reason}")]
    ArtifactWriteFailure { path: PathBuf, reason: String },

    #[error("cannot read model artifact {path}: {reason}")]
    ArtifactReadFailure { path: PathBuf, reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
