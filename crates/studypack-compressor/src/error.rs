//! Error types for the compressor

use thiserror::Error;

/// Errors raised when building a compressor
///
/// Compression itself never fails.
#[derive(Error, Debug)]
pub enum CompressorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
