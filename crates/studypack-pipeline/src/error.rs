//! Error types for the pipeline

use studypack_domain::DocumentId;
use studypack_extractor::ExtractorError;
use thiserror::Error;

/// Errors that abort a pipeline run
///
/// Problems with the input data never show up here: unreadable files yield
/// no text, and a failed model call or malformed output yields empty
/// elements for that chunk.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The document store has no document with this id
    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// A store read or write failed
    #[error("Storage error: {0}")]
    Store(String),

    /// The model kept failing after every retry
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractorError),

    /// Background task failure (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}
