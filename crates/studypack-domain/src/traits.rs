//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the pipeline and storage.
//! Implementations live in other crates (`studypack-store`), and tests
//! substitute in-memory fakes.

use crate::{ArtifactId, CompressedArtifact, DocumentId, RawDocument, StoredArtifact};

/// Stores uploaded documents and the raw text extracted from them
///
/// Implemented by the infrastructure layer (studypack-store)
pub trait DocumentStore {
    /// Error type for store operations
    type Error;

    /// Save an uploaded file and return its identifier
    fn save(&mut self, bytes: &[u8], name: &str) -> Result<DocumentId, Self::Error>;

    /// Read a stored document; `None` if the id is unknown
    fn read(&self, id: DocumentId) -> Result<Option<RawDocument>, Self::Error>;

    /// Persist the raw text extracted from a document (side artifact)
    fn save_extracted_text(&mut self, id: DocumentId, text: &str) -> Result<(), Self::Error>;

    /// Read back the extracted text of a document, if any was saved
    fn read_extracted_text(&self, id: DocumentId) -> Result<Option<String>, Self::Error>;
}

/// Keyed store for compressed artifacts
///
/// Writes are all-or-nothing: after a failed `write`, `read` of that id returns
/// whatever was there before (usually nothing).
pub trait ArtifactStore {
    /// Error type for store operations
    type Error;

    /// Persist an artifact under `id`, replacing any previous value
    fn write(&mut self, id: ArtifactId, artifact: &CompressedArtifact) -> Result<(), Self::Error>;

    /// Read an artifact, normalized into a [`StoredArtifact`]
    fn read(&self, id: ArtifactId) -> Result<Option<StoredArtifact>, Self::Error>;

    /// List stored artifact ids, oldest first
    fn list(&self) -> Result<Vec<ArtifactId>, Self::Error>;
}
