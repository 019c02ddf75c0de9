//! Lighthouse Synthesizer
//!
//! Produces the final Markdown PRD.
//!
//! Two entry points share one template skeleton:
//!
//! - [`Synthesizer`] takes every signal extracted from a transcript and asks
//!   the model to merge them into a PRD with a fixed category-to-section
//!   mapping.
//! - [`NotesAnalyzer`] sends free-form PM notes straight to the model with a
//!   template that adds a "Strategic Suggestions & Future Enhancements"
//!   section.
//!
//! Both return the model's reply verbatim.
//!
//! # Known limitation
//!
//! Signals from overlapping chunks are often near-duplicates. Merging them is
//! left entirely to the model, so de-duplication is best-effort: the same
//! requirement can appear twice, or two distinct ones can be folded together.
//! Nothing downstream detects either case. [`check_skeleton`] only verifies
//! that the expected headings exist.

#![warn(missing_docs)]

mod config;
mod error;
mod notes;
mod prompt;
mod skeleton;
mod synthesizer;

pub use config::SynthesizerConfig;
pub use error::SynthesizerError;
pub use notes::NotesAnalyzer;
pub use prompt::{build_payload, NOTES_TEMPLATE, PAYLOAD_KEY, SYNTHESIS_TEMPLATE};
pub use skeleton::{check_skeleton, expected_sections, PRD_SECTIONS, SUGGESTIONS_SECTION};
pub use synthesizer::Synthesizer;
