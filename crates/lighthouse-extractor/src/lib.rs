//! Lighthouse Signal Extractor
//!
//! Turns a raw meeting transcript into a flat list of categorized signals.
//!
//! # Overview
//!
//! A transcript is too long to hand to the model in one piece, so it is cut
//! into fixed-width character windows that overlap slightly. Each window is
//! sent to the model on its own with an instruction template that names the
//! ten signal categories and the JSON reply shape. Replies are parsed into
//! [`Signal`](lighthouse_domain::Signal) values and merged in chunk order.
//!
//! # Architecture
//!
//! ```text
//! Text → TextChunker → [Chunk] → LLM (per chunk) → parse → [Signal]
//! ```
//!
//! # Failure isolation
//!
//! A chunk whose generation call fails, or whose reply is not usable JSON,
//! contributes nothing and is recorded as a [`ChunkFailure`]. The other chunks
//! carry on. Bad records inside a usable reply are dropped one by one and
//! counted in [`ExtractionOutcome::rejected_records`].
//!
//! # Example Usage
//!
//! ```no_run
//! use lighthouse_domain::NoProgress;
//! use lighthouse_extractor::{ExtractorConfig, SignalExtractor};
//! use lighthouse_llm::MockProvider;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = Arc::new(MockProvider::new(r#"{"extracted_signals": []}"#));
//! let extractor = SignalExtractor::new(llm, ExtractorConfig::default())?;
//!
//! let outcome = extractor
//!     .extract_text("Sarah: We need CSV export.", &NoProgress)
//!     .await?;
//!
//! println!("Signals: {}", outcome.signals.len());
//! println!("Failed chunks: {}", outcome.failed_chunk_count());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;

#[cfg(test)]
mod tests;

pub use chunking::{split, TextChunker};
pub use config::{ExtractorConfig, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_TEXT_LENGTH, DEFAULT_OVERLAP};
pub use error::{ChunkError, ExtractorError};
pub use extractor::SignalExtractor;
pub use parser::{parse_extraction_reply, ParsedReply};
pub use prompt::ExtractionPrompt;
pub use types::{ChunkFailure, ExtractionMetadata, ExtractionOutcome};
