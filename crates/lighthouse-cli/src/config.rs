//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use lighthouse_extractor::ExtractorConfig;
use lighthouse_llm::gemini::{DEFAULT_ENDPOINT, DEFAULT_MAX_RETRIES, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use lighthouse_llm::GeminiProvider;
use lighthouse_pipeline::PipelineConfig;
use lighthouse_synthesizer::SynthesizerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Upper bound for `llm.max_retries`
pub const MAX_RETRIES_LIMIT: u32 = 10;

/// Default ceiling on input size in bytes
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 15 * 1024 * 1024;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Generation service settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Chunking and extraction settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Synthesis settings
    #[serde(default)]
    pub synthesizer: SynthesizerConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Generation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key; takes precedence over the environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable to read the API key from
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per request for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Directory PRDs are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Largest accepted input, in bytes
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: u64,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".lighthouse").join("config.toml"))
    }

    /// Load configuration from the given file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the given file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize configuration to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check the settings that can be checked without a network call.
    pub fn validate(&self) -> Result<()> {
        self.extractor.validate().map_err(CliError::Config)?;
        if self.llm.model.trim().is_empty() {
            return Err(CliError::Config("llm.model must not be empty".into()));
        }
        if self.llm.timeout_secs == 0 {
            return Err(CliError::Config("llm.timeout_secs must be greater than 0".into()));
        }
        if self.llm.max_retries > MAX_RETRIES_LIMIT {
            return Err(CliError::Config(format!(
                "llm.max_retries must be at most {}",
                MAX_RETRIES_LIMIT
            )));
        }
        if self.settings.max_input_bytes == 0 {
            return Err(CliError::Config(
                "settings.max_input_bytes must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Settings for the pipeline.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            extractor: self.extractor.clone(),
            synthesizer: self.synthesizer.clone(),
        }
    }

    /// A copy with the API key hidden, for display.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.llm.api_key.is_some() {
            config.llm.api_key = Some("********".to_string());
        }
        config
    }
}

impl LlmConfig {
    /// Resolve the API key from the config, then the process environment.
    pub fn resolve_api_key(&self) -> Result<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Resolve the API key with a custom environment lookup.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: String| {
            let key = key.trim().to_string();
            (!key.is_empty()).then_some(key)
        };
        self.api_key
            .clone()
            .and_then(non_blank)
            .or_else(|| lookup(&self.api_key_env).and_then(non_blank))
            .ok_or_else(|| {
                CliError::Credential(format!(
                    "No API key found. Set llm.api_key in the config file or the {} environment variable.",
                    self.api_key_env
                ))
            })
    }

    /// Build the generation client described by these settings.
    pub fn build_provider(&self) -> Result<GeminiProvider> {
        let api_key = self.resolve_api_key()?;
        let provider = GeminiProvider::new(
            api_key,
            self.model.clone(),
            Duration::from_secs(self.timeout_secs),
        )?
        .with_endpoint(self.endpoint.clone())
        .with_max_retries(self.max_retries);
        Ok(provider)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: default_api_key_env(),
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            output_dir: default_output_dir(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_max_input_bytes() -> u64 {
    DEFAULT_MAX_INPUT_BYTES
}
