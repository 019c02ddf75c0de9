//! Configuration for a full pipeline run

use lighthouse_extractor::ExtractorConfig;
use lighthouse_synthesizer::SynthesizerConfig;
use serde::{Deserialize, Serialize};

/// Settings for every stage of the pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Chunking and extraction
    pub extractor: ExtractorConfig,

    /// Synthesis and notes analysis
    pub synthesizer: SynthesizerConfig,
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.extractor.validate()
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
