//! Error types for the pipeline

use lighthouse_extractor::ExtractorError;
use lighthouse_synthesizer::SynthesizerError;
use std::fmt;
use thiserror::Error;

/// Stage of a run in which a fatal error happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Checking the input before any model call
    Input,
    /// Building the pipeline from its settings
    Configuration,
    /// Chunked signal extraction
    Extraction,
    /// Document generation (synthesis or notes analysis)
    Synthesis,
}

impl Phase {
    /// Get the phase name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Input => "input",
            Phase::Configuration => "configuration",
            Phase::Extraction => "extraction",
            Phase::Synthesis => "synthesis",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that end a run without a document
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input is empty or only whitespace
    #[error("Input is empty")]
    EmptyInput,

    /// The input is longer than the configured ceiling
    #[error("Input too long: {length} chars (max: {max})")]
    TextTooLong {
        /// Input length in characters
        length: usize,
        /// Configured ceiling in characters
        max: usize,
    },

    /// Every chunk failed or yielded nothing
    #[error("No signals extracted from {chunk_count} chunks ({failed_chunks} failed)")]
    NothingExtracted {
        /// Chunks processed
        chunk_count: usize,
        /// Chunks whose extraction failed
        failed_chunks: usize,
    },

    /// The final generation call failed
    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesizerError),

    /// Invalid pipeline settings
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PipelineError {
    /// The phase the error belongs to
    pub fn phase(&self) -> Phase {
        match self {
            PipelineError::EmptyInput | PipelineError::TextTooLong { .. } => Phase::Input,
            PipelineError::NothingExtracted { .. } => Phase::Extraction,
            PipelineError::Synthesis(_) => Phase::Synthesis,
            PipelineError::Configuration(_) => Phase::Configuration,
        }
    }

    /// One line suitable for an end user
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::EmptyInput => {
                "The document appears to be empty. Please provide a file with content.".to_string()
            }
            PipelineError::TextTooLong { length, max } => format!(
                "The document is {} characters long, above the {} character limit.",
                length, max
            ),
            PipelineError::NothingExtracted { .. } => {
                "Analysis complete, but no valid requirements could be extracted. The final PRD cannot be generated."
                    .to_string()
            }
            PipelineError::Synthesis(SynthesizerError::NoSignals) => {
                "There were no signals to build a document from.".to_string()
            }
            PipelineError::Synthesis(e) => format!(
                "The final document could not be generated: {}",
                first_line(&e.to_string())
            ),
            PipelineError::Configuration(msg) => {
                format!("Invalid configuration: {}", first_line(msg))
            }
        }
    }
}

/// Detail past the first line belongs in the debug log
fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default().trim_end()
}

impl From<ExtractorError> for PipelineError {
    fn from(e: ExtractorError) -> Self {
        match e {
            ExtractorError::TextTooLong(length, max) => PipelineError::TextTooLong { length, max },
            ExtractorError::Config(msg) => PipelineError::Configuration(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases() {
        assert_eq!(PipelineError::EmptyInput.phase(), Phase::Input);
        assert_eq!(
            PipelineError::NothingExtracted {
                chunk_count: 3,
                failed_chunks: 3
            }
            .phase(),
            Phase::Extraction
        );
        assert_eq!(
            PipelineError::Synthesis(SynthesizerError::Generation("boom".into())).phase(),
            Phase::Synthesis
        );
        assert_eq!(
            PipelineError::Configuration("bad".into()).phase(),
            Phase::Configuration
        );
    }

    #[test]
    fn test_extractor_errors_map_to_phases() {
        let too_long: PipelineError = ExtractorError::TextTooLong(20, 10).into();
        assert!(matches!(
            too_long,
            PipelineError::TextTooLong { length: 20, max: 10 }
        ));

        let config: PipelineError = ExtractorError::Config("overlap".into()).into();
        assert_eq!(config.phase(), Phase::Configuration);
    }

    #[test]
    fn test_user_messages_are_single_line() {
        let errors = [
            PipelineError::EmptyInput,
            PipelineError::TextTooLong { length: 20, max: 10 },
            PipelineError::NothingExtracted {
                chunk_count: 1,
                failed_chunks: 0,
            },
            PipelineError::Synthesis(SynthesizerError::Generation("HTTP 500".into())),
        ];
        for error in errors {
            assert!(!error.user_message().contains('\n'));
        }
    }

    #[test]
    fn test_multi_line_generation_error_is_cut() {
        let error = PipelineError::Synthesis(SynthesizerError::Generation(
            "Communication error: HTTP 400 Bad Request: {\n  \"error\": {\n    \"code\": 400\n  }\n}"
                .into(),
        ));
        let msg = error.user_message();
        assert!(!msg.contains('\n'));
        assert!(msg.starts_with("The final document could not be generated: "));
        assert!(msg.ends_with("HTTP 400 Bad Request: {"));
    }
}
