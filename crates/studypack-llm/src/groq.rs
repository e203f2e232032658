//! Groq Provider Implementation
//!
//! Talks to Groq's OpenAI-compatible chat completions API. Any other server
//! speaking the same protocol works by pointing `endpoint` at it.
//!
//! HTTP failures are mapped onto the [`LlmError`] taxonomy so the retry
//! policy can tell transient failures (429, 413, `json_validate_failed`) from
//! terminal ones. The provider itself never retries.
//!
//! # Examples
//!
//! ```no_run
//! use studypack_llm::GroqProvider;
//!
//! let provider = GroqProvider::from_env(
//!     "https://api.groq.com/openai/v1",
//!     "GROQ_API_KEY",
//!     60,
//! ).unwrap();
//! ```

use crate::{CompletionRequest, LlmError, ModelClient};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default Groq API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1";

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Chat completions client for Groq and other OpenAI-compatible servers
pub struct GroqProvider {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

/// Response envelope of the chat completions API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl GroqProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g., "https://api.groq.com/openai/v1")
    /// - `api_key`: Bearer token
    /// - `timeout_secs`: Per-request timeout
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Create a provider reading the API key from environment variable `key_var`
    pub fn from_env(
        endpoint: impl Into<String>,
        key_var: &str,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        let api_key = std::env::var(key_var).map_err(|_| {
            LlmError::Authentication(format!("environment variable {} is not set", key_var))
        })?;
        Self::new(endpoint, api_key, timeout_secs)
    }

    /// The API base URL in use
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ModelClient for GroqProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint);

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(classify_error(status, &body, &request.model));
        }

        let envelope = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        first_choice_content(envelope)
    }
}

fn first_choice_content(envelope: ChatCompletionResponse) -> Result<String, LlmError> {
    envelope
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| LlmError::InvalidResponse("Response has no message content".to_string()))
}

/// Map an unsuccessful HTTP response onto the error taxonomy
///
/// Groq reports some conditions only in the body (`rate_limit_exceeded`,
/// `json_validate_failed`), so the body is inspected as well as the status.
pub fn classify_error(status: StatusCode, body: &str, model: &str) -> LlmError {
    let detail = format!("HTTP {}: {}", status, body);

    if status == StatusCode::TOO_MANY_REQUESTS || body.contains("rate_limit_exceeded") {
        LlmError::RateLimited(detail)
    } else if status == StatusCode::PAYLOAD_TOO_LARGE || body.contains("Request Entity Too Large") {
        LlmError::PayloadTooLarge(detail)
    } else if body.contains("json_validate_failed") {
        LlmError::SchemaValidation(detail)
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        LlmError::Authentication(detail)
    } else if status == StatusCode::NOT_FOUND {
        LlmError::ModelNotAvailable(model.to_string())
    } else {
        LlmError::Communication(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = GroqProvider::new("https://api.groq.com/openai/v1/", "key", 5).unwrap();
        assert_eq!(provider.endpoint(), "https://api.groq.com/openai/v1");
    }

    #[test]
    fn test_from_env_missing_key() {
        let result = GroqProvider::from_env(DEFAULT_ENDPOINT, "STUDYPACK_TEST_UNSET_KEY_VAR", 5);
        assert!(matches!(result, Err(LlmError::Authentication(_))));
    }

    #[test]
    fn test_classify_rate_limit() {
        let err = classify_error(StatusCode::TOO_MANY_REQUESTS, "slow down", "m");
        assert!(matches!(err, LlmError::RateLimited(_)));

        let err = classify_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"code":"rate_limit_exceeded"}}"#,
            "m",
        );
        assert!(matches!(err, LlmError::RateLimited(_)));
    }

    #[test]
    fn test_classify_payload_too_large() {
        let err = classify_error(StatusCode::PAYLOAD_TOO_LARGE, "", "m");
        assert!(matches!(err, LlmError::PayloadTooLarge(_)));
    }

    #[test]
    fn test_classify_schema_validation() {
        let body = r#"{"error":{"message":"Failed to generate JSON","code":"json_validate_failed"}}"#;
        let err = classify_error(StatusCode::BAD_REQUEST, body, "m");
        assert!(matches!(err, LlmError::SchemaValidation(_)));
        assert!(err.is_transient());
    }

    #[test]
    fn test_classify_terminal_errors() {
        assert!(matches!(
            classify_error(StatusCode::UNAUTHORIZED, "", "m"),
            LlmError::Authentication(_)
        ));
        assert_eq!(
            classify_error(StatusCode::NOT_FOUND, "", "gemma2-9b-it"),
            LlmError::ModelNotAvailable("gemma2-9b-it".to_string())
        );
        assert!(matches!(
            classify_error(StatusCode::INTERNAL_SERVER_ERROR, "boom", "m"),
            LlmError::Communication(_)
        ));
    }

    #[test]
    fn test_first_choice_content() {
        let envelope: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"{\"terms\":[]}"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_choice_content(envelope).unwrap(), r#"{"terms":[]}"#);

        let empty: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(first_choice_content(empty), Err(LlmError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_error_handling_unreachable_endpoint() {
        // Invalid port triggers a request error before any network traffic
        let provider = GroqProvider::new("http://localhost:99999", "key", 1).unwrap();

        let result = provider.complete(&CompletionRequest::json("m", "test")).await;

        match result {
            Err(LlmError::Communication(_)) => {}
            other => panic!("Expected Communication error, got {:?}", other),
        }
    }
}
