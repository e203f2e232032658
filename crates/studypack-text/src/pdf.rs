//! PDF text layer

use crate::TextError;

/// Per-page text layer extraction
pub trait PdfExtractor: Send + Sync {
    /// Text of every page, in page order; an empty string for pages with no
    /// text layer
    fn page_texts(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, TextError>;
}

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with embedded text layers.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl PdfExtractor for PdfTextExtractor {
    fn page_texts(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, TextError> {
        // pdf-extract panics on some malformed inputs; treat that as a parse failure
        std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(pdf_bytes))
            .map_err(|_| TextError::PdfParsing("PDF parser panicked".to_string()))?
            .map_err(|e| TextError::PdfParsing(e.to_string()))
    }
}
