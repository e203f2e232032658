//! Studypack Domain Layer
//!
//! Core data model and collaborator traits for the study-material compression
//! pipeline. Everything here is plain data plus trait boundaries; the crates
//! that talk to PDFs, OCR engines, language models and databases depend on
//! this one, never the other way round.
//!
//! ## Key Concepts
//!
//! - **RawDocument**: an uploaded file's bytes plus its detected [`DocumentKind`]
//! - **TextChunk**: a bounded window over the extracted text
//! - **StudyElements**: the five-field structured summary (terms, definitions,
//!   examples, questions, answers)
//! - **CompressedArtifact**: the terminal output of one pipeline run
//! - **StoredArtifact**: what comes back out of an artifact store, which may be
//!   a structured artifact or a legacy plain-text digest

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod artifact;
pub mod chunk;
pub mod document;
pub mod elements;
pub mod ids;
pub mod traits;

// Re-exports for convenience
pub use artifact::{CompressedArtifact, StoredArtifact};
pub use chunk::TextChunk;
pub use document::{DocumentKind, RawDocument};
pub use elements::{ElementField, StudyElements};
pub use ids::{ArtifactId, DocumentId};
