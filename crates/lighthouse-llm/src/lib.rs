//! Lighthouse LLM Provider Layer
//!
//! Pluggable implementations of the `LlmProvider` trait from `lighthouse-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Scripted, deterministic double for tests
//! - `GeminiProvider`: Google Gemini `generateContent` API integration
//!
//! # Examples
//!
//! ```
//! use lighthouse_llm::MockProvider;
//! use lighthouse_domain::{LlmProvider, SamplingConfig};
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider
//!     .generate(&["test prompt".to_string()], &SamplingConfig::default())
//!     .unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod gemini;

use lighthouse_domain::{LlmProvider as LlmProviderTrait, SamplingConfig};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use gemini::GeminiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit or quota exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Credential rejected by the service
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// One call seen by a [`MockProvider`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Prompt parts in order
    pub parts: Vec<String>,

    /// Sampling settings the caller asked for
    pub sampling: SamplingConfig,
}

impl RecordedRequest {
    /// All parts joined with newlines
    pub fn prompt(&self) -> String {
        self.parts.join("\n")
    }
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error,
}

/// Mock LLM provider for deterministic testing
///
/// Returns scripted responses without any network calls. Rules are matched
/// against the joined prompt by substring, first registered rule wins;
/// unmatched prompts get the default response. Every call is recorded.
///
/// # Examples
///
/// ```
/// use lighthouse_llm::MockProvider;
/// use lighthouse_domain::{LlmProvider, SamplingConfig};
///
/// let mut provider = MockProvider::new("fallback");
/// provider.add_response("CHUNK-1", r#"{"extracted_signals": []}"#);
///
/// let sampling = SamplingConfig::deterministic_json();
/// let reply = provider.generate(&["... CHUNK-1 ...".to_string()], &sampling).unwrap();
/// assert_eq!(reply, r#"{"extracted_signals": []}"#);
/// assert_eq!(provider.generate(&["other".to_string()], &sampling).unwrap(), "fallback");
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    rules: Arc<Mutex<Vec<(String, MockReply)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    model_name: String,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            rules: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            model_name: "mock".to_string(),
        }
    }

    /// Set the model name reported in run metadata
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Reply with `response` whenever the prompt contains `pattern`
    pub fn add_response(&mut self, pattern: impl Into<String>, response: impl Into<String>) {
        lock(&self.rules).push((pattern.into(), MockReply::Text(response.into())));
    }

    /// Fail whenever the prompt contains `pattern`
    pub fn add_error(&mut self, pattern: impl Into<String>) {
        lock(&self.rules).push((pattern.into(), MockReply::Error));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Forget all recorded calls
    pub fn reset_call_count(&self) {
        lock(&self.requests).clear();
    }

    /// Calls seen so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Number of recorded calls whose prompt contains `pattern`
    pub fn calls_containing(&self, pattern: &str) -> usize {
        lock(&self.requests)
            .iter()
            .filter(|r| r.prompt().contains(pattern))
            .count()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, parts: &[String], sampling: &SamplingConfig) -> Result<String, Self::Error> {
        let request = RecordedRequest {
            parts: parts.to_vec(),
            sampling: *sampling,
        };
        let prompt = request.prompt();
        lock(&self.requests).push(request);

        let rules = lock(&self.rules);
        match rules.iter().find(|(pattern, _)| prompt.contains(pattern.as_str())) {
            Some((_, MockReply::Text(response))) => Ok(response.clone()),
            Some((_, MockReply::Error)) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Lock a mock's shared state, recovering from a poisoned mutex
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(text: &str) -> Vec<String> {
        vec![text.to_string()]
    }

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate(&parts("any prompt"), &SamplingConfig::default());
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_pattern_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        let sampling = SamplingConfig::default();
        assert_eq!(provider.generate(&parts("say hello"), &sampling).unwrap(), "world");
        assert_eq!(provider.generate(&parts("foo!"), &sampling).unwrap(), "bar");
        assert_eq!(
            provider.generate(&parts("unknown"), &sampling).unwrap(),
            "Default mock response"
        );
    }

    #[test]
    fn test_mock_provider_first_rule_wins() {
        let mut provider = MockProvider::default();
        provider.add_response("alpha", "first");
        provider.add_response("alpha beta", "second");

        let reply = provider
            .generate(&parts("alpha beta"), &SamplingConfig::default())
            .unwrap();
        assert_eq!(reply, "first");
    }

    #[test]
    fn test_mock_provider_matches_across_parts() {
        let mut provider = MockProvider::default();
        provider.add_response("all_extracted_signals", "document");

        let request = vec!["template".to_string(), "{\"all_extracted_signals\": []}".to_string()];
        let reply = provider.generate(&request, &SamplingConfig::default()).unwrap();
        assert_eq!(reply, "document");
    }

    #[test]
    fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.generate(&parts("prompt1"), &SamplingConfig::default()).unwrap();
        provider.generate(&parts("prompt2"), &SamplingConfig::default()).unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.calls_containing("prompt2"), 1);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_mock_provider_records_sampling() {
        let provider = MockProvider::new("{}");
        provider
            .generate(&parts("extract"), &SamplingConfig::deterministic_json())
            .unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].sampling.json_mode);
        assert_eq!(requests[0].parts, vec!["extract".to_string()]);
    }

    #[test]
    fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.generate(&parts("a bad prompt"), &SamplingConfig::default());
        assert!(matches!(result.unwrap_err(), LlmError::Other(_)));
        // Failed calls are still recorded
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test").with_model_name("mock-pro");
        let provider2 = provider1.clone();

        provider1.generate(&parts("test"), &SamplingConfig::default()).unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
        assert_eq!(provider2.model_name(), "mock-pro");
    }
}
