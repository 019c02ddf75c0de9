//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            println!("{}", config.redacted().to_toml()?);
        }
        ConfigAction::Init { force } => {
            init_config(path, force)?;
            println!(
                "{}",
                formatter.success(&format!("Configuration written to {}", path.display()))
            );
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
    }
    Ok(())
}

/// Write a default configuration file.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save_to(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".lighthouse").join("config.toml");

        init_config(&path, false).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("[llm]"));
        assert!(written.contains("gemini-2.5-pro"));
        assert!(written.contains("[extractor]"));
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[llm]\nmodel = \"custom\"\n").unwrap();

        assert!(matches!(init_config(&path, false), Err(CliError::Config(_))));
        assert!(fs::read_to_string(&path).unwrap().contains("custom"));

        init_config(&path, true).unwrap();
        assert!(!fs::read_to_string(&path).unwrap().contains("custom"));
    }
}
