//! Error types for text extraction

use thiserror::Error;

/// Errors raised inside the extractor
///
/// These never escape [`TextExtractor::extract`](crate::TextExtractor::extract),
/// which logs them and degrades to partial or empty text.
#[derive(Error, Debug)]
pub enum TextError {
    /// The PDF could not be parsed
    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    /// A page image could not be produced or re-encoded
    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    /// The OCR engine could not be initialized
    #[error("OCR initialization failed: {0}")]
    OcrInit(String),

    /// The OCR engine failed on an image
    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),

    /// No OCR engine is configured
    #[error("OCR is not available in this build")]
    OcrUnavailable,
}
