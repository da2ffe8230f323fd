//! Text-generation capability behind a narrow trait.
//!
//! Conversation logic never talks to a model directly: it hands a system
//! role, a prompt, and an output budget to a `TextGenerator` and gets
//! prose back. The concrete implementation is an Ollama-compatible HTTP
//! client; tests use `MockGenerator`.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Preferred local models in order of preference.
const DEFAULT_MODELS: &[&str] = &["medgemma", "medgemma:4b", "medgemma:latest"];

/// Per-call generation knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Errors from text generation. All are recoverable at the turn level:
/// callers fall back to a deterministic reply.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Cannot reach the generation service at {0}")]
    Connection(String),
    #[error("HTTP client error: {0}")]
    HttpClient(String),
    #[error("Generation service returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("Failed to parse generation response: {0}")]
    ResponseParsing(String),
    #[error("Generation service returned empty text")]
    EmptyResponse,
}

/// Opaque prompt-in, prose-out capability.
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        system: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError>;
}

// ═══════════════════════════════════════════════════════════
// OllamaGenerator
// ═══════════════════════════════════════════════════════════

/// Ollama HTTP client for local LLM inference.
pub struct OllamaGenerator {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaGenerator {
    /// Create a generator pointing at an Ollama instance.
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Result<Self, GenerationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GenerationError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        })
    }

    /// Default Ollama instance at localhost:11434 with 5-minute timeout.
    pub fn default_local() -> Result<Self, GenerationError> {
        Self::new("http://localhost:11434", DEFAULT_MODELS[0], 300)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Request body for Ollama /api/generate
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

/// Response body from Ollama /api/generate
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl TextGenerator for OllamaGenerator {
    fn generate(
        &self,
        system: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
            options: OllamaOptions {
                temperature: options.temperature,
                num_predict: options.max_tokens,
            },
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                GenerationError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                GenerationError::HttpClient(format!(
                    "Request timed out after {}s",
                    self.timeout_secs
                ))
            } else {
                GenerationError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OllamaGenerateResponse = response
            .json()
            .map_err(|e| GenerationError::ResponseParsing(e.to_string()))?;

        let text = parsed.response.trim().to_string();
        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }
}

// ═══════════════════════════════════════════════════════════
// MockGenerator
// ═══════════════════════════════════════════════════════════

/// Mock generator for testing — returns a configurable response and can
/// fail a configurable number of leading calls (retry coverage).
pub struct MockGenerator {
    response: String,
    remaining_failures: Mutex<u32>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockGenerator {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            remaining_failures: Mutex::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail the first `times` calls with an upstream error, then succeed.
    pub fn failing(mut self, times: u32) -> Self {
        self.remaining_failures = Mutex::new(times);
        self
    }

    /// (system, prompt) pairs recorded across all calls.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().expect("mock lock").clone()
    }
}

impl TextGenerator for MockGenerator {
    fn generate(
        &self,
        system: &str,
        prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        self.calls
            .lock()
            .expect("mock lock")
            .push((system.to_string(), prompt.to_string()));

        let mut remaining = self.remaining_failures.lock().expect("mock lock");
        if *remaining > 0 {
            *remaining -= 1;
            return Err(GenerationError::Upstream {
                status: 503,
                body: "injected failure".into(),
            });
        }
        Ok(self.response.clone())
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
