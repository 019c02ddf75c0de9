//! Configuration for synthesis and notes analysis

use serde::{Deserialize, Serialize};

/// Configuration for the Synthesizer and the Notes Analyzer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesizerConfig {
    /// Check generated documents for the expected section headings and log
    /// a warning for each one missing. The document is never altered.
    pub validate_skeleton: bool,
}

impl SynthesizerConfig {
    /// Strict preset: skeleton checking on
    pub fn strict() -> Self {
        Self {
            validate_skeleton: true,
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
