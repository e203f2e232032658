//! Studypack Pipeline
//!
//! Orchestrates one document's journey from stored bytes to a persisted
//! compressed artifact.
//!
//! # Architecture
//!
//! ```text
//! DocumentStore → TextExtractor → ElementExtractor (chunk → model → merge)
//!               → Compressor → ArtifactStore
//! ```
//!
//! A run aborts only when the document is missing, the model keeps failing
//! after retries, or a store write fails. A document without text ends the
//! run early with no artifact.

#![warn(missing_docs)]

mod context;
mod error;
mod pipeline;
mod report;

pub use context::{build_file_context, combine_artifacts};
pub use error::PipelineError;
pub use pipeline::Pipeline;
pub use report::{IngestReport, RunReport};
