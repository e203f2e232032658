//! Configuration for the element extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;
use studypack_llm::RetryPolicy;

/// Configuration for chunking and model calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Chunk window size (characters)
    pub chunk_size: usize,

    /// Characters shared between consecutive chunks
    pub chunk_overlap: usize,

    /// Model name sent with every request
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Output token ceiling per call
    pub max_tokens: u32,

    /// Attempts per model call before giving up
    pub max_retries: u32,

    /// Delay before the first retry (milliseconds), doubled on each retry
    pub retry_base_delay_ms: u64,
}

impl ExtractorConfig {
    /// Get the base retry delay as a Duration
    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    /// Retry policy for model calls
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.retry_base_delay())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err("chunk_overlap must be smaller than chunk_size".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be between 0.0 and 2.0".to_string());
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration sized for an 8k-context hosted model
    fn default() -> Self {
        Self {
            chunk_size: 13_000,
            chunk_overlap: 500,
            model: "gemma2-9b-it".to_string(),
            temperature: 0.2,
            max_tokens: 4000,
            max_retries: 5,
            retry_base_delay_ms: 1000,
        }
    }
}

impl ExtractorConfig {
    /// Aggressive preset: smaller chunks and shorter backoff for faster turnaround
    pub fn aggressive() -> Self {
        Self {
            chunk_size: 6_000,
            chunk_overlap: 250,
            max_tokens: 2000,
            max_retries: 3,
            retry_base_delay_ms: 500,
            ..Self::default()
        }
    }

    /// Lenient preset: larger chunks and more patience with rate limits
    pub fn lenient() -> Self {
        Self {
            chunk_size: 20_000,
            chunk_overlap: 1_000,
            max_tokens: 6000,
            max_retries: 8,
            retry_base_delay_ms: 2000,
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
