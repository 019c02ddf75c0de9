//! Single-pass analysis of product manager notes

use crate::config::SynthesizerConfig;
use crate::error::SynthesizerError;
use crate::prompt::NOTES_TEMPLATE;
use crate::synthesizer::{generate_text, warn_missing_sections};
use lighthouse_domain::{InputKind, LlmProvider};
use std::sync::Arc;
use tracing::info;

/// Turns free-form notes into a PRD with one generation call
///
/// No chunking and no extraction happen here; notes are assumed to fit in a
/// single request.
pub struct NotesAnalyzer<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    config: SynthesizerConfig,
}

impl<L> NotesAnalyzer<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new NotesAnalyzer
    pub fn new(llm_provider: Arc<L>, config: SynthesizerConfig) -> Self {
        Self {
            llm_provider,
            config,
        }
    }

    /// Analyze notes into a PRD; the reply is returned verbatim
    pub async fn analyze(&self, notes: &str) -> Result<String, SynthesizerError> {
        info!("Analyzing {} chars of notes in a single pass", notes.len());

        let parts = vec![NOTES_TEMPLATE.to_string(), notes.to_string()];
        let document = generate_text(Arc::clone(&self.llm_provider), parts).await?;

        info!("Notes analysis produced {} chars", document.len());
        if self.config.validate_skeleton {
            warn_missing_sections(&document, InputKind::Notes);
        }
        Ok(document)
    }
}
