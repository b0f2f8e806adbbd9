use std::path::PathBuf;

use thiserror::Error;

/// Configuration defects. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("rubric table is empty")]
    EmptyRubricTable,

    #[error("rubric '{rubric}' has invalid weight {weight}; weights must be positive integers")]
    InvalidWeight { rubric: String, weight: i64 },

    #[error("rubric '{0}' has no keywords")]
    NoKeywords(String),

    #[error("rubric '{0}' has no candidate remedies")]
    NoOutcomes(String),

    #[error("rubric at row {0} has no name")]
    UnnamedRubric(usize),

    #[error("duplicate rubric name: {0}")]
    DuplicateRubric(String),

    #[error("red flag list is empty")]
    EmptyRedFlags,

    #[error("question bank is empty: {0}")]
    EmptyQuestionBank(String),

    #[error("question category '{category}' is invalid: {reason}")]
    InvalidCategory { category: String, reason: String },

    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: String, reason: String },
}

/// Reference-text collaborator failures. Never abort an analysis.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("reference source unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read corpus at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
}
