//! Compressed artifacts and their stored forms

use crate::StudyElements;
use serde::{Deserialize, Serialize};

/// Terminal output of one pipeline run
///
/// Serializes to exactly:
///
/// ```json
/// { "structured_data": { "terms": [], "definitions": [], "examples": [], "questions": [], "answers": [] },
///   "compressed_text": "...", "original_length": 0, "compressed_length": 0 }
/// ```
///
/// Lengths are counted in characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedArtifact {
    /// Merged, deduplicated study elements for the whole document
    pub structured_data: StudyElements,

    /// Concise digest derived from `structured_data`
    pub compressed_text: String,

    /// Length of the extracted text the artifact was built from
    pub original_length: usize,

    /// Length of `compressed_text`
    pub compressed_length: usize,
}

impl CompressedArtifact {
    /// Build an artifact, measuring both lengths in characters
    pub fn new(
        structured_data: StudyElements,
        compressed_text: String,
        original_text: &str,
    ) -> Self {
        let compressed_length = compressed_text.chars().count();
        Self {
            structured_data,
            compressed_text,
            original_length: original_text.chars().count(),
            compressed_length,
        }
    }
}

/// An artifact as read back from an artifact store
///
/// Older records hold only a plain digest string; newer ones hold the full
/// structured artifact. Stores normalize whatever they find into one of these
/// two variants so callers never inspect raw JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredArtifact {
    /// Full structured artifact
    Structured(CompressedArtifact),

    /// Legacy record holding only the concise text
    LegacyText(String),
}

impl StoredArtifact {
    /// The concise digest, whichever format the record is in
    pub fn concise_text(&self) -> &str {
        match self {
            StoredArtifact::Structured(artifact) => &artifact.compressed_text,
            StoredArtifact::LegacyText(text) => text,
        }
    }

    /// Structured elements, if this record carries them
    pub fn structured(&self) -> Option<&StudyElements> {
        match self {
            StoredArtifact::Structured(artifact) => Some(&artifact.structured_data),
            StoredArtifact::LegacyText(_) => None,
        }
    }

    /// True for records in the legacy plain-text format
    pub fn is_legacy(&self) -> bool {
        matches!(self, StoredArtifact::LegacyText(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_json_shape() {
        let artifact = CompressedArtifact::new(
            StudyElements::new(),
            "Term: x".to_string(),
            "some text",
        );
        let json = serde_json::to_string(&artifact).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"structured_data":{"terms":[],"definitions":[],"examples":[],"questions":[],"answers":[]},"#,
                r#""compressed_text":"Term: x","original_length":9,"compressed_length":7}"#
            )
        );
    }

    #[test]
    fn test_lengths_count_characters() {
        let artifact = CompressedArtifact::new(StudyElements::new(), "é".to_string(), "ñandú");
        assert_eq!(artifact.original_length, 5);
        assert_eq!(artifact.compressed_length, 1);
    }

    #[test]
    fn test_stored_artifact_concise_text() {
        let structured = StoredArtifact::Structured(CompressedArtifact::new(
            StudyElements::new(),
            "digest".to_string(),
            "",
        ));
        let legacy = StoredArtifact::LegacyText("old digest".to_string());

        assert_eq!(structured.concise_text(), "digest");
        assert_eq!(legacy.concise_text(), "old digest");
        assert!(structured.structured().is_some());
        assert!(legacy.structured().is_none());
        assert!(legacy.is_legacy());
    }
}
