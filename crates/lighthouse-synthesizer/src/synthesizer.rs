//! Merge extracted signals into one PRD

use crate::config::SynthesizerConfig;
use crate::error::SynthesizerError;
use crate::prompt::{build_payload, SYNTHESIS_TEMPLATE};
use crate::skeleton::check_skeleton;
use lighthouse_domain::{InputKind, LlmProvider, SamplingConfig, Signal};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns the full signal list of a transcript into a Markdown PRD
pub struct Synthesizer<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    config: SynthesizerConfig,
}

impl<L> Synthesizer<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new Synthesizer
    pub fn new(llm_provider: Arc<L>, config: SynthesizerConfig) -> Self {
        Self {
            llm_provider,
            config,
        }
    }

    /// Synthesize a PRD from all signals of a run
    ///
    /// Sends one request of two parts: the synthesis template, then the
    /// signals as JSON. The reply is returned verbatim.
    ///
    /// # Errors
    ///
    /// [`SynthesizerError::NoSignals`] when `signals` is empty; the model is
    /// not called in that case.
    pub async fn synthesize(&self, signals: &[Signal]) -> Result<String, SynthesizerError> {
        if signals.is_empty() {
            return Err(SynthesizerError::NoSignals);
        }

        let payload = build_payload(signals)?;
        info!(
            "Synthesizing document from {} signals ({} chars of JSON)",
            signals.len(),
            payload.len()
        );

        let parts = vec![SYNTHESIS_TEMPLATE.to_string(), payload];
        let document = generate_text(Arc::clone(&self.llm_provider), parts).await?;

        info!("Synthesized document: {} chars", document.len());
        if self.config.validate_skeleton {
            warn_missing_sections(&document, InputKind::Transcript);
        }
        Ok(document)
    }
}

/// Run one free-form text generation on the blocking pool
pub(crate) async fn generate_text<L>(
    llm: Arc<L>,
    parts: Vec<String>,
) -> Result<String, SynthesizerError>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    debug!(
        "Generation request: {} parts, {} chars",
        parts.len(),
        parts.iter().map(String::len).sum::<usize>()
    );

    tokio::task::spawn_blocking(move || {
        llm.generate(&parts, &SamplingConfig::deterministic_text())
            .map_err(|e| SynthesizerError::Generation(e.to_string()))
    })
    .await
    .map_err(|e| SynthesizerError::Task(e.to_string()))?
}

pub(crate) fn warn_missing_sections(document: &str, kind: InputKind) {
    for section in check_skeleton(document, kind) {
        warn!("Generated document has no '{}' section", section);
    }
}
