//! Error handling for the placement readiness pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadinessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Analysis not found: {0}")]
    NotFound(String),

    #[error("Invalid analysis entry: {}", .0.join("; "))]
    InvalidEntry(Vec<String>),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ReadinessError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ReadinessError {
    fn from(err: anyhow::Error) -> Self {
        ReadinessError::Storage(err.to_string())
    }
}
