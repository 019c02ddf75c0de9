//! Chunks command implementation.

use crate::cli::ChunksArgs;
use crate::config::Config;
use crate::error::Result;
use crate::input::read_input;
use crate::output::Formatter;
use lighthouse_domain::Chunk;
use lighthouse_extractor::TextChunker;

/// Execute the chunks command. Makes no model call.
pub fn execute_chunks(args: ChunksArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = read_input(&args.input, config.settings.max_input_bytes)?;
    let chunks = plan_chunks(&text, config)?;

    println!("{}", formatter.format_chunks(&chunks)?);
    eprintln!(
        "{}",
        formatter.info(&format!(
            "{} chars in {} chunk(s) of up to {} chars, overlap {}",
            text.chars().count(),
            chunks.len(),
            config.extractor.chunk_size,
            config.extractor.overlap
        ))
    );
    Ok(())
}

/// Split `text` the way the extractor would.
pub fn plan_chunks(text: &str, config: &Config) -> Result<Vec<Chunk>> {
    Ok(TextChunker::from_config(&config.extractor)?.chunk(text))
}
