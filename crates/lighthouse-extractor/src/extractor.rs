//! Core Signal Extractor implementation

use crate::chunking::TextChunker;
use crate::config::ExtractorConfig;
use crate::error::{ChunkError, ExtractorError};
use crate::parser::{parse_extraction_reply, ParsedReply};
use crate::prompt::ExtractionPrompt;
use crate::types::{ChunkFailure, ExtractionMetadata, ExtractionOutcome};
use lighthouse_domain::{Chunk, LlmProvider, ProgressReporter, SamplingConfig};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Turns chunks of a transcript into categorized signals
pub struct SignalExtractor<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    chunker: TextChunker,
    config: ExtractorConfig,
}

impl<L> SignalExtractor<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new extractor
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Config`] if the configuration does not validate.
    pub fn new(llm_provider: Arc<L>, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let chunker = TextChunker::from_config(&config)?;
        Ok(Self {
            llm_provider,
            chunker,
            config,
        })
    }

    /// The configuration this extractor runs with
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Split text into chunks, enforcing the length ceiling
    pub fn chunk(&self, text: &str) -> Result<Vec<Chunk>, ExtractorError> {
        let char_count = text.chars().count();
        if char_count > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(
                char_count,
                self.config.max_text_length,
            ));
        }
        Ok(self.chunker.chunk(text))
    }

    /// Chunk the text and extract signals from every chunk
    pub async fn extract_text(
        &self,
        text: &str,
        progress: &dyn ProgressReporter,
    ) -> Result<ExtractionOutcome, ExtractorError> {
        let chunks = self.chunk(text)?;
        info!(
            "Split {} chars into {} chunks",
            text.chars().count(),
            chunks.len()
        );
        Ok(self.extract(chunks, progress).await)
    }

    /// Extract signals from a sequence of chunks
    ///
    /// A failing chunk is logged and recorded in the outcome; it never stops
    /// the remaining chunks. Signals come back in chunk order whatever the
    /// concurrency setting.
    pub async fn extract(
        &self,
        chunks: Vec<Chunk>,
        progress: &dyn ProgressReporter,
    ) -> ExtractionOutcome {
        let start_time = Instant::now();
        let chunk_count = chunks.len();
        let sequence_indices: Vec<usize> = chunks.iter().map(|c| c.sequence_index).collect();

        let results = if self.config.max_concurrent_chunks > 1 && chunk_count > 1 {
            self.extract_concurrent(chunks, progress).await
        } else {
            self.extract_sequential(chunks, progress).await
        };

        let mut signals = Vec::new();
        let mut failures = Vec::new();
        let mut rejected_records = 0;

        for (sequence_index, result) in sequence_indices.into_iter().zip(results) {
            match result {
                Ok(parsed) => {
                    debug!(
                        "Chunk {} yielded {} signals ({} rejected)",
                        sequence_index,
                        parsed.signals.len(),
                        parsed.rejected
                    );
                    rejected_records += parsed.rejected;
                    signals.extend(parsed.signals);
                }
                Err(error) => {
                    warn!("Chunk {} contributed no signals: {}", sequence_index, error);
                    failures.push(ChunkFailure {
                        sequence_index,
                        error,
                    });
                }
            }
        }

        let metadata = ExtractionMetadata {
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            model_name: self.llm_provider.model_name().to_string(),
            chunk_count,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Extraction complete: {} signals from {} chunks, {} failed, {} records rejected",
            signals.len(),
            chunk_count,
            failures.len(),
            rejected_records
        );

        ExtractionOutcome {
            signals,
            failures,
            rejected_records,
            metadata,
        }
    }

    async fn extract_sequential(
        &self,
        chunks: Vec<Chunk>,
        progress: &dyn ProgressReporter,
    ) -> Vec<Result<ParsedReply, ChunkError>> {
        let total = chunks.len();
        let mut results = Vec::with_capacity(total);

        for chunk in chunks {
            debug!("Processing chunk {}/{}", chunk.sequence_index + 1, total);
            results.push(Self::extract_chunk(Arc::clone(&self.llm_provider), chunk).await);
            let completed = results.len();
            progress.report(
                completed,
                total,
                &format!("Analyzed chunk {} of {}", completed, total),
            );
        }

        results
    }

    async fn extract_concurrent(
        &self,
        chunks: Vec<Chunk>,
        progress: &dyn ProgressReporter,
    ) -> Vec<Result<ParsedReply, ChunkError>> {
        let total = chunks.len();
        let limit = self.config.max_concurrent_chunks;
        let mut slots: Vec<Option<Result<ParsedReply, ChunkError>>> = vec![None; total];
        let mut pending = chunks.into_iter().enumerate();
        let mut tasks = JoinSet::new();
        let mut completed = 0;

        debug!("Extracting {} chunks, up to {} at a time", total, limit);

        loop {
            while tasks.len() < limit {
                let Some((position, chunk)) = pending.next() else {
                    break;
                };
                let llm = Arc::clone(&self.llm_provider);
                tasks.spawn(async move { (position, Self::extract_chunk(llm, chunk).await) });
            }

            let Some(joined) = tasks.join_next().await else {
                break;
            };
            match joined {
                Ok((position, result)) => {
                    if let Some(slot) = slots.get_mut(position) {
                        *slot = Some(result);
                    }
                }
                Err(e) => warn!("Extraction task did not complete: {}", e),
            }

            completed += 1;
            progress.report(
                completed,
                total,
                &format!("Analyzed chunk {} of {}", completed, total),
            );
        }

        slots
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| {
                    Err(ChunkError::Task("task did not return a result".to_string()))
                })
            })
            .collect()
    }

    /// Run one chunk through the model and parse the reply
    async fn extract_chunk(llm: Arc<L>, chunk: Chunk) -> Result<ParsedReply, ChunkError> {
        let prompt = ExtractionPrompt::new(&chunk.text).build();
        debug!(
            "Chunk {} prompt length: {} chars",
            chunk.sequence_index,
            prompt.len()
        );

        // Call in a blocking context since LlmProvider is not async
        let reply = tokio::task::spawn_blocking(move || {
            llm.generate(&[prompt], &SamplingConfig::deterministic_json())
                .map_err(|e| ChunkError::Generation(e.to_string()))
        })
        .await
        .map_err(|e| ChunkError::Task(e.to_string()))??;

        debug!(
            "Chunk {} reply length: {} chars",
            chunk.sequence_index,
            reply.len()
        );
        parse_extraction_reply(&reply)
    }
}
