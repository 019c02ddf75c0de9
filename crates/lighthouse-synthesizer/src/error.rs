//! Error types for the Synthesizer

use thiserror::Error;

/// Errors produced while turning signals or notes into a document
#[derive(Error, Debug)]
pub enum SynthesizerError {
    /// Synthesis was asked to run with nothing to synthesize
    #[error("No signals to synthesize")]
    NoSignals,

    /// The generation call failed
    #[error("Generation failed: {0}")]
    Generation(String),

    /// The signal payload could not be serialized
    #[error("Failed to serialize signals: {0}")]
    Payload(#[from] serde_json::Error),

    /// The blocking generation task panicked or was cancelled
    #[error("Generation task failed: {0}")]
    Task(String),
}
