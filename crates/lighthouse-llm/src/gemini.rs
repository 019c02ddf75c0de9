//! Gemini Provider Implementation
//!
//! Talks to Google's Generative Language REST API (`models/{model}:generateContent`).
//!
//! # Features
//!
//! - Multi-part prompts sent as one user turn
//! - Temperature and JSON mode (`responseMimeType`) from [`SamplingConfig`]
//! - Request timeout enforced by the HTTP client
//! - Retry with exponential backoff on transient failures (429, 5xx, network)
//!
//! # Examples
//!
//! ```no_run
//! use lighthouse_llm::GeminiProvider;
//! use std::time::Duration;
//!
//! let provider = GeminiProvider::new("api-key", "gemini-2.5-pro", Duration::from_secs(300))
//!     .unwrap()
//!     .with_max_retries(2);
//! ```

use crate::LlmError;
use lighthouse_domain::{LlmProvider as LlmProviderTrait, SamplingConfig};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Generative Language API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

/// Default timeout for one request (5 minutes; synthesis of a long transcript is slow)
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Longest wait between two attempts
pub const MAX_BACKOFF_SECS: u64 = 30;

const JSON_MIME_TYPE: &str = "application/json";

/// Gemini API provider
pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for the generateContent API
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

/// Response from the generateContent API
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Parameters
    ///
    /// - `api_key`: API key for the Generative Language API
    /// - `model`: Model to use (e.g., "gemini-2.5-pro")
    /// - `timeout`: Upper bound for a single HTTP request
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Other`] if the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        // Every blocking call runs on its own short-lived runtime, so pooled
        // connections would outlive the runtime that owns them.
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Point the provider at a different API endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the maximum number of attempts per request (at least one)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Full URL of the generateContent method for the configured model
    pub fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Generate text using the Gemini API
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The API key is rejected
    /// - The model is not available
    /// - The rate limit is still exceeded after all attempts
    /// - Network communication fails after all attempts
    /// - The reply carries no text (e.g. blocked by safety filters)
    pub async fn generate_content(
        &self,
        parts: &[String],
        sampling: &SamplingConfig,
    ) -> Result<String, LlmError> {
        let url = self.url();
        let body = build_request(parts, sampling);

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let reply = response.json::<GenerateContentResponse>().await.map_err(|e| {
                            LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                        })?;
                        return extract_text(reply);
                    }

                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    debug!("Gemini error body (HTTP {}): {}", status, error_text);
                    let error = classify_status(status, &self.model, &error_text);
                    if !is_transient(status) {
                        return Err(error);
                    }
                    warn!("Gemini request failed with HTTP {} (attempt {})", status, attempts + 1);
                    last_error = Some(error);
                }
                Err(e) => {
                    warn!("Gemini request failed: {} (attempt {})", e, attempts + 1);
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                tokio::time::sleep(backoff_delay(attempts)).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

impl LlmProviderTrait for GeminiProvider {
    type Error = LlmError;

    /// Blocking wrapper around [`GeminiProvider::generate_content`]
    ///
    /// Must not be called from inside an async task; the extractor runs it on
    /// tokio's blocking pool.
    fn generate(&self, parts: &[String], sampling: &SamplingConfig) -> Result<String, Self::Error> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?;

        debug!(
            "Gemini request: model={}, parts={}, json_mode={}",
            self.model,
            parts.len(),
            sampling.json_mode
        );
        runtime.block_on(self.generate_content(parts, sampling))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn build_request<'a>(parts: &'a [String], sampling: &SamplingConfig) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: parts.iter().map(|p| Part { text: p }).collect(),
        }],
        generation_config: GenerationConfig {
            temperature: sampling.temperature,
            response_mime_type: sampling.json_mode.then_some(JSON_MIME_TYPE),
        },
    }
}

/// Pull the reply text out of the first candidate
fn extract_text(response: GenerateContentResponse) -> Result<String, LlmError> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(LlmError::InvalidResponse(format!("Prompt blocked: {}", reason)));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("No candidates in response".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "UNKNOWN".to_string());
        return Err(LlmError::InvalidResponse(format!(
            "Empty reply (finish reason: {})",
            reason
        )));
    }

    Ok(text)
}

/// Wait before the next attempt: 1s, 2s, 4s, ... up to [`MAX_BACKOFF_SECS`]
fn backoff_delay(attempts: u32) -> Duration {
    let secs = 2u64.saturating_pow(attempts.saturating_sub(1));
    Duration::from_secs(secs.min(MAX_BACKOFF_SECS))
}

/// Map a failed reply to an error. The body is only logged, never carried.
fn classify_status(status: StatusCode, model: &str, body: &str) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LlmError::Authentication(format!("HTTP {}", status))
        }
        // Gemini answers a bad key with 400 INVALID_ARGUMENT
        StatusCode::BAD_REQUEST if is_invalid_key(body) => {
            LlmError::Authentication("API key not valid".to_string())
        }
        StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(model.to_string()),
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
        _ => LlmError::Communication(format!("HTTP {}", status)),
    }
}

fn is_invalid_key(body: &str) -> bool {
    body.contains("API_KEY_INVALID") || body.contains("API key not valid")
}

fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}
