//! Error types for the Signal Extractor

use thiserror::Error;

/// Errors that stop an extraction before any chunk is processed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// Configuration error (e.g. overlap not smaller than chunk size)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Text exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),
}

/// Failure of a single chunk; never aborts the run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkError {
    /// The generation call itself failed
    #[error("generation failed: {0}")]
    Generation(String),

    /// The reply was not valid JSON
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// The reply was JSON but neither accepted shape
    #[error("unexpected JSON structure: {0}")]
    UnexpectedShape(String),

    /// The task running the chunk panicked or was cancelled
    #[error("extraction task failed: {0}")]
    Task(String),
}

impl From<serde_json::Error> for ChunkError {
    fn from(e: serde_json::Error) -> Self {
        ChunkError::InvalidJson(e.to_string())
    }
}
