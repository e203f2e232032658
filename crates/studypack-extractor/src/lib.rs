//! Studypack Extractor
//!
//! Turns extracted document text into structured study elements with a
//! generative model.
//!
//! # Architecture
//!
//! ```text
//! Text → TextChunker → (prompt → ModelClient → parser) per chunk → Aggregator
//! ```
//!
//! # Key Features
//!
//! - **Chunking**: Overlapping fixed-size character windows sized for the model
//! - **Retries**: Transient provider errors are retried with exponential backoff
//! - **Repair**: Missing or non-list fields become empty, nested items are stringified
//! - **Graceful Degradation**: A chunk whose call fails or whose output is
//!   malformed contributes nothing instead of aborting the document
//! - **Deterministic Merge**: First-seen order, exact-match deduplication
//!
//! # Example Usage
//!
//! ```no_run
//! use studypack_extractor::{ElementExtractor, ExtractorConfig};
//! use studypack_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{"terms": ["Osmosis"]}"#);
//! let extractor = ElementExtractor::new(llm, ExtractorConfig::default())?;
//!
//! let result = extractor.extract_document("Osmosis is the diffusion of water.").await?;
//!
//! println!("Terms: {:?}", result.elements.terms);
//! println!("Chunks: {}", result.stats.chunks);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod aggregate;
mod chunking;
mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;


pub use aggregate::{merge, Aggregator};
pub use chunking::{chunk_text, TextChunker};
pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::ElementExtractor;
pub use parser::parse_elements;
pub use prompt::{build_prompt, build_request, EXTRACTION_INSTRUCTIONS};
pub use types::{ChunkExtraction, DocumentExtraction, ExtractionStats};
