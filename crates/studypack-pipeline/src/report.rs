//! Run reports

use serde::Serialize;
use studypack_domain::{ArtifactId, DocumentId};

/// What one successful pipeline run produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Source document
    pub document_id: DocumentId,

    /// Persisted artifact
    pub artifact_id: ArtifactId,

    /// Chunks sent to the model
    pub chunks: usize,

    /// Chunks that failed or returned malformed output and contributed nothing
    pub chunks_degraded: usize,

    /// Extracted text length (characters)
    pub original_length: usize,

    /// Concise text length (characters)
    pub compressed_length: usize,
}

impl RunReport {
    /// Concise text length as a fraction of the extracted text length
    pub fn compression_ratio(&self) -> f64 {
        if self.original_length == 0 {
            return 0.0;
        }
        self.compressed_length as f64 / self.original_length as f64
    }
}

/// Result of [`Pipeline::ingest`](crate::Pipeline::ingest)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Id of the stored upload
    pub document_id: DocumentId,

    /// Run report, `None` when the document had no text
    pub run: Option<RunReport>,
}
