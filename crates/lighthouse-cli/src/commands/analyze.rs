//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::input::read_input;
use crate::output::{output_filename, Formatter};
use crate::progress::ConsoleProgress;
use chrono::Local;
use lighthouse_domain::{AnalysisRun, InputKind, LlmProvider, ProgressReporter};
use lighthouse_pipeline::Pipeline;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Execute the analyze command.
pub async fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    // A missing credential must fail before the input is touched
    let llm = Arc::new(config.llm.build_provider()?);
    let text = read_input(&args.input, config.settings.max_input_bytes)?;
    let progress = ConsoleProgress::new(formatter.color_enabled());

    let run = analyze_with(llm, args.kind.into(), &text, config, &progress).await?;
    let document = run.result_document.as_deref().unwrap_or_default();
    eprintln!("{}", formatter.run_summary(&run));

    if args.stdout {
        println!("{}", document);
        return Ok(());
    }

    let output_dir = args
        .output_dir
        .unwrap_or_else(|| config.settings.output_dir.clone());
    let path = write_document(&output_dir, document)?;
    println!(
        "{}",
        formatter.success(&format!("Analysis complete. PRD written to {}", path.display()))
    );
    Ok(())
}

/// Run the pipeline over `text` with the given provider.
pub async fn analyze_with<L>(
    llm: Arc<L>,
    kind: InputKind,
    text: &str,
    config: &Config,
    progress: &dyn ProgressReporter,
) -> Result<AnalysisRun>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    let pipeline = Pipeline::new(llm, config.pipeline_config())?;
    Ok(pipeline.run(kind, text, progress).await?)
}

/// Write `document` to a timestamped file in `dir`.
pub fn write_document(dir: &Path, document: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(output_filename(Local::now()));
    fs::write(&path, document)?;
    info!("Wrote {} bytes to {}", document.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use lighthouse_domain::NoProgress;
    use lighthouse_llm::MockProvider;
    use lighthouse_pipeline::PipelineError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_analyze_notes() {
        let llm = Arc::new(MockProvider::new("# PRD: Lighthouse Platform - Dark Mode"));

        let run = analyze_with(
            Arc::clone(&llm),
            InputKind::Notes,
            "Add a dark mode toggle",
            &Config::default(),
            &NoProgress,
        )
        .await
        .unwrap();

        assert_eq!(
            run.result_document.as_deref(),
            Some("# PRD: Lighthouse Platform - Dark Mode")
        );
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_analyze_empty_input() {
        let llm = Arc::new(MockProvider::new("# PRD"));

        let result = analyze_with(llm, InputKind::Transcript, "\n\n", &Config::default(), &NoProgress).await;

        assert!(matches!(
            result,
            Err(CliError::Pipeline(PipelineError::EmptyInput))
        ));
    }

    #[test]
    fn test_write_document() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("prds");

        let path = write_document(&out, "# PRD").unwrap();

        assert!(path.starts_with(&out));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("Lighthouse_Requirements_"));
        assert!(name.ends_with(".md"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "# PRD");
    }
}
