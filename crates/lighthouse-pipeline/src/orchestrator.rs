//! Pipeline orchestrator: picks the branch for the declared input kind

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::progress::PhaseProgress;
use lighthouse_domain::{AnalysisRun, InputKind, LlmProvider, ProgressReporter};
use lighthouse_extractor::SignalExtractor;
use lighthouse_synthesizer::{NotesAnalyzer, Synthesizer};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

const SYNTHESIS_MESSAGE: &str = "Phase 2: Synthesizing final document from all signals...";

/// Runs a document through extraction and synthesis, or through the
/// single-pass notes analysis
///
/// A pipeline holds no per-run state. The same value can serve any number of
/// runs one after another.
pub struct Pipeline<L>
where
    L: LlmProvider,
{
    extractor: SignalExtractor<L>,
    synthesizer: Synthesizer<L>,
    notes_analyzer: NotesAnalyzer<L>,
    model_name: String,
    max_text_length: usize,
}

impl<L> Pipeline<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new pipeline around one generation provider
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Configuration`] if the settings do not validate.
    pub fn new(llm_provider: Arc<L>, config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Configuration)?;

        let model_name = llm_provider.model_name().to_string();
        let max_text_length = config.extractor.max_text_length;
        let extractor = SignalExtractor::new(Arc::clone(&llm_provider), config.extractor)?;
        let synthesizer = Synthesizer::new(Arc::clone(&llm_provider), config.synthesizer.clone());
        let notes_analyzer = NotesAnalyzer::new(llm_provider, config.synthesizer);

        Ok(Self {
            extractor,
            synthesizer,
            notes_analyzer,
            model_name,
            max_text_length,
        })
    }

    /// The signal extractor used by the transcript branch
    pub fn extractor(&self) -> &SignalExtractor<L> {
        &self.extractor
    }

    /// Analyze one document
    ///
    /// Input that is empty after trimming, or longer than the configured
    /// ceiling, is rejected before any generation call. On success the
    /// returned run carries the document; every failure ends the run without
    /// one.
    pub async fn run(
        &self,
        input_kind: InputKind,
        text: &str,
        progress: &dyn ProgressReporter,
    ) -> Result<AnalysisRun, PipelineError> {
        let start_time = Instant::now();
        self.check_input(text)?;

        let mut run = AnalysisRun::new(input_kind, text);
        run.model_name = self.model_name.clone();
        info!(
            "Starting {} run {} ({} chars, model '{}')",
            input_kind,
            run.id,
            text.chars().count(),
            self.model_name
        );

        let result = match input_kind {
            InputKind::Transcript => self.run_transcript(&mut run, progress).await,
            InputKind::Notes => self.run_notes(&run).await,
        };
        run.processing_time_ms = start_time.elapsed().as_millis() as u64;

        match result {
            Ok(document) => {
                info!(
                    "Run {} complete in {} ms: {} chars",
                    run.id,
                    run.processing_time_ms,
                    document.len()
                );
                run.result_document = Some(document);
                Ok(run)
            }
            Err(e) => {
                warn!("Run {} failed during {}: {}", run.id, e.phase(), e);
                debug!("Run {} failure detail: {:?}", run.id, e);
                Err(e)
            }
        }
    }

    fn check_input(&self, text: &str) -> Result<(), PipelineError> {
        if text.trim().is_empty() {
            return Err(PipelineError::EmptyInput);
        }
        let length = text.chars().count();
        if length > self.max_text_length {
            return Err(PipelineError::TextTooLong {
                length,
                max: self.max_text_length,
            });
        }
        Ok(())
    }

    async fn run_transcript(
        &self,
        run: &mut AnalysisRun,
        progress: &dyn ProgressReporter,
    ) -> Result<String, PipelineError> {
        let phase_one = PhaseProgress::new(progress, "Phase 1");
        let outcome = self
            .extractor
            .extract_text(&run.source_text, &phase_one)
            .await?;

        run.chunk_count = outcome.metadata.chunk_count;
        run.failed_chunks = outcome.failed_chunk_count();
        run.rejected_records = outcome.rejected_records;
        run.signals = outcome.signals;

        if run.signals.is_empty() {
            return Err(PipelineError::NothingExtracted {
                chunk_count: run.chunk_count,
                failed_chunks: run.failed_chunks,
            });
        }

        progress.report(run.chunk_count, run.chunk_count, SYNTHESIS_MESSAGE);
        Ok(self.synthesizer.synthesize(&run.signals).await?)
    }

    async fn run_notes(&self, run: &AnalysisRun) -> Result<String, PipelineError> {
        Ok(self.notes_analyzer.analyze(&run.source_text).await?)
    }
}
