//! Result types for element extraction

use serde::{Deserialize, Serialize};
use studypack_domain::StudyElements;

/// Result of extracting one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkExtraction {
    /// Elements found in the chunk, all-empty when degraded
    pub elements: StudyElements,

    /// True when the model call failed or its output could not be parsed
    pub degraded: bool,
}

impl ChunkExtraction {
    pub(crate) fn parsed(elements: StudyElements) -> Self {
        Self {
            elements,
            degraded: false,
        }
    }

    pub(crate) fn degraded() -> Self {
        Self {
            elements: StudyElements::new(),
            degraded: true,
        }
    }
}

/// Result of extracting a whole document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentExtraction {
    /// Merged, deduplicated elements
    pub elements: StudyElements,

    /// Statistics about the run
    pub stats: ExtractionStats,
}

/// Counters collected while extracting a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Chunks the text was split into
    pub chunks: usize,

    /// Chunks that failed or returned malformed output
    pub chunks_degraded: usize,

    /// Length of the input text in characters
    pub text_length: usize,
}
