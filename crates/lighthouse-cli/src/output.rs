//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use chrono::{DateTime, Local};
use colored::*;
use lighthouse_domain::{AnalysisRun, Chunk, Signal};
use lighthouse_extractor::ChunkFailure;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Name of the PRD file written for a run finished at `now`.
pub fn output_filename(now: DateTime<Local>) -> String {
    format!("Lighthouse_Requirements_{}.md", now.format("%Y%m%d_%H%M%S"))
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Whether color codes are emitted.
    pub fn color_enabled(&self) -> bool {
        self.color_enabled
    }

    /// Format extracted signals.
    pub fn format_signals(&self, signals: &[Signal]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_signals_json(signals),
            OutputFormat::Table => self.format_signals_table(signals),
            OutputFormat::Quiet => Ok(self.format_signals_quiet(signals)),
        }
    }

    fn format_signals_json(&self, signals: &[Signal]) -> Result<String> {
        let json_signals: Vec<serde_json::Value> = signals
            .iter()
            .map(|s| {
                serde_json::json!({
                    "category": s.category.as_str(),
                    "speaker": s.speaker,
                    "content": s.content,
                    "priority_signal": s.priority.as_str(),
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json_signals)?)
    }

    fn format_signals_table(&self, signals: &[Signal]) -> Result<String> {
        if signals.is_empty() {
            return Ok(self.colorize("No signals found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Category", "Speaker", "Priority", "Content"]);

        for (idx, signal) in signals.iter().enumerate() {
            builder.push_record([
                (idx + 1).to_string(),
                signal.category.to_string(),
                signal.speaker.clone(),
                signal.priority.to_string(),
                signal.content.clone(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        Ok(table.to_string())
    }

    /// One signal per line, content only.
    fn format_signals_quiet(&self, signals: &[Signal]) -> String {
        signals
            .iter()
            .map(|s| s.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a chunk plan.
    pub fn format_chunks(&self, chunks: &[Chunk]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json_chunks: Vec<serde_json::Value> = chunks
                    .iter()
                    .map(|c| {
                        serde_json::json!({
                            "sequence_index": c.sequence_index,
                            "start_offset": c.start_offset,
                            "end_offset": c.end_offset(),
                            "length": c.char_len(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json_chunks)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Chunk", "Start", "End", "Length"]);
                for chunk in chunks {
                    builder.push_record([
                        chunk.sequence_index.to_string(),
                        chunk.start_offset.to_string(),
                        chunk.end_offset().to_string(),
                        chunk.char_len().to_string(),
                    ]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(chunks.len().to_string()),
        }
    }

    /// Summarize failed chunks.
    pub fn chunk_failures(&self, failures: &[ChunkFailure], chunk_count: usize) -> String {
        let mut lines = vec![self.warning(&format!(
            "{} of {} chunk(s) could not be analyzed",
            failures.len(),
            chunk_count
        ))];
        for failure in failures {
            lines.push(format!(
                "  chunk {}: {}",
                failure.sequence_index + 1,
                failure.error
            ));
        }
        lines.join("\n")
    }

    /// Summarize a finished run.
    pub fn run_summary(&self, run: &AnalysisRun) -> String {
        let mut summary = format!(
            "{} run {} with {} in {:.1}s",
            run.input_kind,
            run.id,
            run.model_name,
            run.processing_time_ms as f64 / 1000.0
        );
        if run.chunk_count > 0 {
            summary.push_str(&format!(
                ": {} signal(s) from {} chunk(s)",
                run.signals.len(),
                run.chunk_count
            ));
            if run.failed_chunks > 0 {
                summary.push_str(&format!(", {} failed", run.failed_chunks));
            }
            if run.rejected_records > 0 {
                summary.push_str(&format!(", {} record(s) rejected", run.rejected_records));
            }
        }
        self.info(&summary)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
