//! Studypack LLM Provider Layer
//!
//! Model client abstraction, error taxonomy and retry policy for every call the
//! pipeline makes to an external generative model.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic, scriptable mock for testing
//! - `GroqProvider`: OpenAI-compatible chat completions over HTTP
//!
//! # Retries
//!
//! Providers never retry on their own. Wrap a provider in [`RetryingClient`]
//! to apply a [`RetryPolicy`] uniformly to every call site.
//!
//! # Examples
//!
//! ```
//! use studypack_llm::{CompletionRequest, MockProvider, ModelClient};
//!
//! # async fn example() {
//! let provider = MockProvider::new(r#"{"terms": []}"#);
//! let request = CompletionRequest::json("gemma2-9b-it", "Extract terms");
//! let reply = provider.complete(&request).await.unwrap();
//! assert_eq!(reply, r#"{"terms": []}"#);
//! # }
//! ```

#![warn(missing_docs)]

pub mod groq;
pub mod retry;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use groq::GroqProvider;
pub use retry::{RetryPolicy, RetryingClient};

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Provider rejected the call because of rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Request body too large for the provider
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Provider failed to produce output matching the requested format
    #[error("Response schema validation failed: {0}")]
    SchemaValidation(String),

    /// Missing or rejected credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response envelope could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// A transient error kept recurring until the retry budget ran out
    #[error("Failed after {attempts} attempts due to persistent errors")]
    PersistentFailure {
        /// Number of attempts made
        attempts: u32,
    },

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// True for the error classes worth retrying: rate limiting, oversized
    /// payloads and response-schema validation failures
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LlmError::RateLimited(_) | LlmError::PayloadTooLarge(_) | LlmError::SchemaValidation(_)
        )
    }
}

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions
    System,
    /// End-user content
    User,
    /// Model output
    Assistant,
}

/// One chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author
    pub role: Role,
    /// Text content
    pub content: String,
}

impl ChatMessage {
    /// A user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Output mode requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free text
    Text,
    /// A single valid JSON object
    JsonObject,
}

/// A complete request to a chat model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    /// Conversation so far
    pub messages: Vec<ChatMessage>,
    /// Model name
    pub model: String,
    /// Requested output mode
    pub response_format: ResponseFormat,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token ceiling
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Single-user-message request in JSON-object mode with conservative
    /// sampling defaults
    pub fn json(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(prompt)],
            model: model.into(),
            response_format: ResponseFormat::JsonObject,
            temperature: 0.2,
            max_tokens: 4000,
        }
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the output token ceiling
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// A generative model that completes chat requests
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Complete `request`, returning the model's text output
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

#[async_trait]
impl<C: ModelClient + ?Sized> ModelClient for Arc<C> {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        (**self).complete(request).await
    }
}

/// Mock LLM provider for deterministic testing
///
/// Returns scripted replies without making any network calls. Replies queued
/// with [`push_response`](Self::push_response) / [`push_error`](Self::push_error)
/// are consumed first, in order; after that every call gets the default reply.
/// Every request is recorded.
///
/// # Examples
///
/// ```
/// use studypack_llm::{CompletionRequest, LlmError, MockProvider, ModelClient};
///
/// # async fn example() {
/// let provider = MockProvider::new("fallback");
/// provider.push_error(LlmError::RateLimited("slow down".into()));
/// provider.push_response("first");
///
/// let request = CompletionRequest::json("m", "p");
/// assert!(provider.complete(&request).await.is_err());
/// assert_eq!(provider.complete(&request).await.unwrap(), "first");
/// assert_eq!(provider.complete(&request).await.unwrap(), "fallback");
/// assert_eq!(provider.call_count(), 3);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_reply: Result<String, LlmError>,
    queue: Arc<Mutex<VecDeque<Result<String, LlmError>>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    /// Create a MockProvider with a fixed response for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_reply: Ok(response.into()),
            queue: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a MockProvider that fails every request with `error`
    pub fn failing(error: LlmError) -> Self {
        Self {
            default_reply: Err(error),
            ..Self::new("")
        }
    }

    /// Queue a one-off successful reply
    pub fn push_response(&self, response: impl Into<String>) {
        self.queue.lock().unwrap().push_back(Ok(response.into()));
    }

    /// Queue a one-off error
    pub fn push_error(&self, error: LlmError) {
        self.queue.lock().unwrap().push_back(Err(error));
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

#[async_trait]
impl ModelClient for MockProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());

        let queued = self.queue.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| self.default_reply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(LlmError::RateLimited("x".into()).is_transient());
        assert!(LlmError::PayloadTooLarge("x".into()).is_transient());
        assert!(LlmError::SchemaValidation("x".into()).is_transient());

        assert!(!LlmError::Authentication("x".into()).is_transient());
        assert!(!LlmError::Communication("x".into()).is_transient());
        assert!(!LlmError::InvalidResponse("x".into()).is_transient());
        assert!(!LlmError::PersistentFailure { attempts: 5 }.is_transient());
    }

    #[test]
    fn test_response_format_serialization() {
        let json = serde_json::to_string(&ResponseFormat::JsonObject).unwrap();
        assert_eq!(json, r#"{"type":"json_object"}"#);
    }

    #[test]
    fn test_request_serialization() {
        let request = CompletionRequest::json("gemma2-9b-it", "hello")
            .with_temperature(0.5)
            .with_max_tokens(10);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "gemma2-9b-it");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["temperature"], 0.5);
        assert_eq!(value["max_tokens"], 10);
    }

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.complete(&CompletionRequest::json("m", "p")).await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_records_requests() {
        let provider = MockProvider::default();
        provider.complete(&CompletionRequest::json("m", "first")).await.unwrap();
        provider.complete(&CompletionRequest::json("m", "second")).await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].messages[0].content, "second");
    }

    #[tokio::test]
    async fn test_mock_provider_failing() {
        let provider = MockProvider::failing(LlmError::Authentication("bad key".into()));
        let result = provider.complete(&CompletionRequest::json("m", "p")).await;
        assert!(matches!(result, Err(LlmError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.complete(&CompletionRequest::json("m", "p")).await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }

    #[tokio::test]
    async fn test_arc_client_delegates() {
        let provider = Arc::new(MockProvider::new("shared"));
        let reply = provider.complete(&CompletionRequest::json("m", "p")).await.unwrap();
        assert_eq!(reply, "shared");
    }
}
