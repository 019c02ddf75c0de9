//! Lighthouse Pipeline
//!
//! Orchestrates one analysis run from raw text to a Markdown PRD.
//!
//! # Branches
//!
//! ```text
//! Transcript: text → chunks → signals → (none? fail) → synthesis → PRD
//! Notes:      text → single-pass analysis → PRD
//! ```
//!
//! Every fatal error is a [`PipelineError`] tagged with the [`Phase`] it came
//! from and a one-line [`user_message`](PipelineError::user_message).
//!
//! # Example Usage
//!
//! ```no_run
//! use lighthouse_domain::InputKind;
//! use lighthouse_llm::MockProvider;
//! use lighthouse_pipeline::{Pipeline, PipelineConfig, TracingProgress};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = Arc::new(MockProvider::new("# PRD"));
//! let pipeline = Pipeline::new(llm, PipelineConfig::default())?;
//!
//! let run = pipeline
//!     .run(InputKind::Notes, "Add a dark mode toggle", &TracingProgress)
//!     .await?;
//! println!("{}", run.result_document.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod orchestrator;
mod progress;

pub use config::PipelineConfig;
pub use error::{Phase, PipelineError};
pub use orchestrator::Pipeline;
pub use progress::TracingProgress;
