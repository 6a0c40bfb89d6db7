//! Error handling for the resume scorer application

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeScorerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),

    #[error("{count} candidate(s) scored below {threshold}")]
    BelowThreshold { count: usize, threshold: u32 },
}

pub type Result<T> = std::result::Result<T, ResumeScorerError>;
