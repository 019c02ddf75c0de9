//! Configuration for the Signal Extractor

use serde::{Deserialize, Serialize};

/// Default chunk width in characters
pub const DEFAULT_CHUNK_SIZE: usize = 12_000;

/// Default overlap between consecutive chunks in characters
pub const DEFAULT_OVERLAP: usize = 500;

/// Default ceiling on input length in characters (matches the 15 MB upload limit)
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 15 * 1024 * 1024;

/// Configuration for the Signal Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Width of each chunk (characters)
    pub chunk_size: usize,

    /// Characters shared by consecutive chunks; must be smaller than `chunk_size`
    pub overlap: usize,

    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Chunks extracted at the same time; 1 keeps extraction strictly sequential
    pub max_concurrent_chunks: usize,
}

impl ExtractorConfig {
    /// Distance between the starts of consecutive chunks
    pub fn stride(&self) -> usize {
        self.chunk_size.saturating_sub(self.overlap)
    }

    /// Validate the configuration
    ///
    /// An overlap at or above the chunk size would stop the window from ever
    /// advancing, so it is rejected here rather than discovered mid-run.
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }
        if self.overlap >= self.chunk_size {
            return Err(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            ));
        }
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.max_concurrent_chunks == 0 {
            return Err("max_concurrent_chunks must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Sequential extraction over 12,000-character windows overlapping by 500
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            max_concurrent_chunks: 1,
        }
    }
}

impl ExtractorConfig {
    /// Parallel preset: default windows, four chunks in flight
    pub fn parallel() -> Self {
        Self {
            max_concurrent_chunks: 4,
            ..Self::default()
        }
    }

    /// Fine-grained preset: smaller windows for models with short context
    pub fn fine_grained() -> Self {
        Self {
            chunk_size: 6_000,
            overlap: 300,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
