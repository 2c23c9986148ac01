//! Error types for Mira.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MiraError {
    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Knowledge table error: {0}")]
    Knowledge(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MiraError>;
