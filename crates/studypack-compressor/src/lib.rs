//! Studypack Compressor
//!
//! Reduces merged [`StudyElements`](studypack_domain::StudyElements) to a
//! short digest for downstream prompts. Compression is deterministic, makes
//! no model calls and never fails; the digest is capped at a fixed number
//! of characters.
//!
//! ```
//! use studypack_compressor::compress;
//! use studypack_domain::StudyElements;
//!
//! let elements = StudyElements {
//!     definitions: vec!["Osmosis: diffusion of water across a membrane".into()],
//!     ..StudyElements::default()
//! };
//! assert_eq!(
//!     compress(&elements),
//!     "Definition: osmosis diffusion water across membrane"
//! );
//! ```

#![warn(missing_docs)]

mod compress;
mod config;
mod error;
mod lemmatizer;
pub mod stopwords;
mod tokenize;

pub use compress::{compress, Compressor, ELLIPSIS};
pub use config::CompressorConfig;
pub use error::CompressorError;
pub use lemmatizer::Lemmatizer;
pub use tokenize::{is_alphanumeric, word_tokenize};
