//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::Result;
use crate::input::read_input;
use crate::output::Formatter;
use crate::progress::ConsoleProgress;
use lighthouse_domain::{LlmProvider, ProgressReporter};
use lighthouse_extractor::{ExtractionOutcome, SignalExtractor};
use std::sync::Arc;

/// Execute the extract command.
pub async fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let llm = Arc::new(config.llm.build_provider()?);
    let text = read_input(&args.input, config.settings.max_input_bytes)?;
    let progress = ConsoleProgress::new(formatter.color_enabled());

    let outcome = extract_with(llm, &text, config, &progress).await?;

    println!("{}", formatter.format_signals(&outcome.signals)?);
    if !outcome.failures.is_empty() {
        eprintln!(
            "{}",
            formatter.chunk_failures(&outcome.failures, outcome.metadata.chunk_count)
        );
    }
    Ok(())
}

/// Chunk `text` and extract signals with the given provider.
pub async fn extract_with<L>(
    llm: Arc<L>,
    text: &str,
    config: &Config,
    progress: &dyn ProgressReporter,
) -> Result<ExtractionOutcome>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    let extractor = SignalExtractor::new(llm, config.extractor.clone())?;
    Ok(extractor.extract_text(text, progress).await?)
}
