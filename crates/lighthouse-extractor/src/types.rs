//! Request and response types for extraction

use crate::error::ChunkError;
use lighthouse_domain::{Priority, Signal, SignalCategory};
use serde::Deserialize;

/// A chunk that contributed no signals because its extraction failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkFailure {
    /// Index of the failed chunk
    pub sequence_index: usize,

    /// What went wrong
    pub error: ChunkError,
}

/// Metadata about an extraction operation
#[derive(Debug, Clone)]
pub struct ExtractionMetadata {
    /// Timestamp when extraction finished (seconds since Unix epoch)
    pub timestamp: u64,

    /// Name of the LLM model used
    pub model_name: String,

    /// Number of chunks processed
    pub chunk_count: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Result of extracting signals from a sequence of chunks
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// Signals in chunk order, then in-reply order
    pub signals: Vec<Signal>,

    /// Chunks that failed, in chunk order
    pub failures: Vec<ChunkFailure>,

    /// Records inside otherwise valid replies that were dropped
    pub rejected_records: usize,

    /// Metadata about the extraction
    pub metadata: ExtractionMetadata,
}

impl ExtractionOutcome {
    /// Number of chunks that failed
    pub fn failed_chunk_count(&self) -> usize {
        self.failures.len()
    }

    /// Number of chunks whose reply was parsed
    pub fn succeeded_chunk_count(&self) -> usize {
        self.metadata.chunk_count - self.failures.len()
    }

    /// Whether nothing at all was extracted
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

/// Internal representation of one signal record from the LLM
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SignalCandidate {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub priority_signal: Option<String>,
}

impl SignalCandidate {
    /// Whether the priority is missing or not one of High/Medium/Low
    pub fn has_unknown_priority(&self) -> bool {
        self.priority_signal
            .as_deref()
            .and_then(Priority::parse)
            .is_none()
    }

    /// Convert into a domain signal
    ///
    /// The category must be one of the ten wire names and the content must
    /// be present. An unknown priority degrades to `Medium`.
    pub fn into_signal(self) -> Result<Signal, String> {
        let category = self
            .category
            .as_deref()
            .ok_or_else(|| "missing 'category'".to_string())
            .and_then(|c| SignalCategory::parse(c).ok_or_else(|| format!("unknown category '{}'", c)))?;

        let content = self
            .content
            .ok_or_else(|| "missing 'content'".to_string())?;

        let priority = self
            .priority_signal
            .as_deref()
            .and_then(Priority::parse)
            .unwrap_or_default();

        Signal::new(
            category,
            self.speaker.unwrap_or_default(),
            content,
            priority,
        )
    }
}
