//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use lighthouse_domain::InputKind;
use std::path::PathBuf;

/// Lighthouse - Turn meeting transcripts and PM notes into a PRD.
#[derive(Debug, Parser)]
#[command(name = "lighthouse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "LIGHTHOUSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (content only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a document and write the PRD
    Analyze(AnalyzeArgs),

    /// Extract signals from a transcript without synthesizing
    Extract(ExtractArgs),

    /// Show how a transcript would be split into chunks
    Chunks(ChunksArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Input file, or `-` for stdin
    pub input: String,

    /// What kind of document the input is
    #[arg(short, long, value_enum, default_value = "transcript")]
    pub kind: KindArg,

    /// Directory to write the PRD to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Print the PRD to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Transcript file, or `-` for stdin
    pub input: String,
}

/// Arguments for the chunks command.
#[derive(Debug, Parser)]
pub struct ChunksArgs {
    /// Transcript file, or `-` for stdin
    pub input: String,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration (API key hidden)
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

/// Input kind argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum KindArg {
    /// Meeting transcript (chunked extraction, then synthesis)
    Transcript,
    /// Product manager notes (single pass)
    Notes,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<KindArg> for InputKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Transcript => InputKind::Transcript,
            KindArg::Notes => InputKind::Notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_command_defaults() {
        let cli = Cli::parse_from(["lighthouse", "analyze", "meeting.txt"]);
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.input, "meeting.txt");
                assert!(matches!(args.kind, KindArg::Transcript));
                assert!(!args.stdout);
                assert!(args.output_dir.is_none());
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_analyze_notes_to_stdout() {
        let cli = Cli::parse_from(["lighthouse", "analyze", "-", "--kind", "notes", "--stdout"]);
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.input, "-");
                assert!(matches!(args.kind, KindArg::Notes));
                assert!(args.stdout);
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::parse_from(["lighthouse", "-vv", "chunks", "t.txt"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::parse_from(["lighthouse", "config", "init", "--force"]);
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            }) => assert!(force),
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_kind_conversion() {
        let kind: InputKind = KindArg::Notes.into();
        assert_eq!(kind, InputKind::Notes);
    }
}
