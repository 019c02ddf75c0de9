//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and the outside
//! world. Implementations live in other crates (or in tests).

/// Sampling settings sent with every generation request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    /// Sampling temperature; 0.0 is the most deterministic setting
    pub temperature: f32,

    /// Ask the service for a strict JSON reply
    pub json_mode: bool,
}

impl SamplingConfig {
    /// Deterministic sampling with a strict JSON reply (extraction)
    pub const fn deterministic_json() -> Self {
        Self {
            temperature: 0.0,
            json_mode: true,
        }
    }

    /// Deterministic sampling with free-form text output (synthesis, notes)
    pub const fn deterministic_text() -> Self {
        Self {
            temperature: 0.0,
            json_mode: false,
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::deterministic_text()
    }
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (lighthouse-llm). Calls block until
/// the service replies; any timeout is the provider's own business.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a completion for an ordered list of prompt parts
    fn generate(&self, parts: &[String], sampling: &SamplingConfig) -> Result<String, Self::Error>;

    /// Model identifier, for run metadata
    fn model_name(&self) -> &str {
        "llm"
    }
}

/// Trait for observing pipeline progress
///
/// Purely observational: implementations must not block the pipeline for long
/// and cannot influence it.
pub trait ProgressReporter: Send + Sync {
    /// Called after each completed step
    fn report(&self, completed: usize, total: usize, message: &str);
}

/// Progress reporter that discards every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _completed: usize, _total: usize, _message: &str) {}
}
