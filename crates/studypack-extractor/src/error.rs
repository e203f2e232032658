//! Error types for the element extractor

use studypack_llm::LlmError;
use thiserror::Error;

/// Errors that can occur during element extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The model call failed and could not be recovered by retrying
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// The model's response was not a JSON object of study elements
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::InvalidFormat(format!("JSON parse error: {}", e))
    }
}
