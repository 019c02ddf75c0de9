//! Lighthouse CLI - Turn meeting transcripts and PM notes into a PRD.

use clap::Parser;
use lighthouse_cli::commands;
use lighthouse_cli::config::OutputFormat;
use lighthouse_cli::{Cli, Command, Config, Formatter};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let fallback = Formatter::new(OutputFormat::Table, !cli.no_color);
    if let Err(e) = run(cli).await {
        debug!(error = ?e, "command failed");
        eprintln!("{}", fallback.error(&e.user_message()));
        std::process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

async fn run(cli: Cli) -> lighthouse_cli::Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    let config = Config::load_from(&config_path)?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Analyze(args) => commands::execute_analyze(args, &config, &formatter).await,
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter).await,
        Command::Chunks(args) => commands::execute_chunks(args, &config, &formatter),
        Command::Config(args) => commands::execute_config(args, &config, &config_path, &formatter),
    }
}
