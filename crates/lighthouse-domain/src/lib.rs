//! Lighthouse Domain Layer
//!
//! This crate contains the core value types for Lighthouse, the requirements
//! synthesis pipeline. It has no I/O and no external dependencies beyond UUID
//! generation, and defines the trait interfaces the other crates plug into.
//!
//! ## Key Concepts
//!
//! - **Chunk**: A bounded, possibly-overlapping window of the source text
//! - **Signal**: One categorized, attributed observation extracted from a chunk
//! - **Analysis Run**: One document going through the pipeline
//! - **Generation capability**: A blocking text-completion service (`LlmProvider`)
//!
//! ## Architecture
//!
//! - Pure value types only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chunk;
pub mod run;
pub mod signal;
pub mod traits;

// Re-exports for convenience
pub use chunk::Chunk;
pub use run::{AnalysisRun, InputKind, RunId};
pub use signal::{Priority, Signal, SignalCategory, UNKNOWN_SPEAKER};
pub use traits::{LlmProvider, NoProgress, ProgressReporter, SamplingConfig};
