//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model provider could not be set up
    #[error("Provider error: {0}")]
    Provider(#[from] studypack_llm::LlmError),

    /// Extractor settings rejected
    #[error("Extractor error: {0}")]
    Extractor(#[from] studypack_extractor::ExtractorError),

    /// Compressor settings rejected
    #[error("Compressor error: {0}")]
    Compressor(#[from] studypack_compressor::CompressorError),

    /// Storage error
    #[error("Storage error: {0}")]
    Store(#[from] studypack_store::StoreError),

    /// A pipeline run aborted
    #[error("processing failed, try again: {0}")]
    Pipeline(#[from] studypack_pipeline::PipelineError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}
