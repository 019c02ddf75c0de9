//! Error types for the CLI application.

use lighthouse_extractor::ExtractorError;
use lighthouse_llm::LlmError;
use lighthouse_pipeline::PipelineError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The generation service credential is missing
    #[error("Credential error: {0}")]
    Credential(String),

    /// Input that cannot be analyzed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Pipeline error
    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    /// Extractor error (diagnostic commands)
    #[error("Extractor error: {0}")]
    Extractor(#[from] ExtractorError),

    /// Generation client error
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CliError {
    /// One line suitable for an end user
    pub fn user_message(&self) -> String {
        match self {
            CliError::Pipeline(e) => e.user_message(),
            other => other
                .to_string()
                .lines()
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lighthouse_synthesizer::SynthesizerError;

    #[test]
    fn test_user_message_is_one_line() {
        let errors = [
            CliError::Llm(LlmError::Communication("HTTP 502\n<html>bad gateway</html>".into())),
            CliError::Config("line one\nline two".into()),
            CliError::Pipeline(PipelineError::Synthesis(SynthesizerError::Generation(
                "HTTP 400 Bad Request: {\n  \"error\": {}\n}".into(),
            ))),
        ];
        for error in errors {
            let msg = error.user_message();
            assert!(!msg.contains('\n'), "multi-line message: {:?}", msg);
        }
    }

    #[test]
    fn test_credential_message() {
        let error = CliError::Credential("No API key found.".into());
        assert_eq!(error.user_message(), "Credential error: No API key found.");
    }
}
