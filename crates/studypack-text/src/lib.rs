//! Studypack Text Extraction
//!
//! Turns a [`RawDocument`] into plain text:
//! - PDFs: the embedded text layer page by page, with OCR of the page image
//!   for pages that carry no text
//! - Images: OCR
//! - Anything else: UTF-8 decoding
//!
//! Extraction never fails. Parser and OCR errors are logged and the caller
//! gets whatever text could be recovered, possibly empty.

#![warn(missing_docs)]

mod error;
mod ocr;
mod pdf;
mod render;

pub use error::TextError;
#[cfg(feature = "ocr")]
pub use ocr::TesseractOcr;
pub use ocr::{MockOcrEngine, NoOcr, OcrEngine};
pub use pdf::{PdfExtractor, PdfTextExtractor};
pub use render::{LopdfImageExtractor, PageRenderer};

use studypack_domain::{DocumentKind, RawDocument};
use tracing::{debug, info, warn};

/// Document-to-text extractor
pub struct TextExtractor {
    pdf: Box<dyn PdfExtractor>,
    renderer: Box<dyn PageRenderer>,
    ocr: Box<dyn OcrEngine>,
}

impl TextExtractor {
    /// Extractor with the lopdf/pdf-extract backends and the given OCR engine
    pub fn new(ocr: impl OcrEngine + 'static) -> Self {
        Self {
            pdf: Box::new(PdfTextExtractor),
            renderer: Box::new(LopdfImageExtractor),
            ocr: Box::new(ocr),
        }
    }

    /// Extractor with the best OCR engine this build offers
    pub fn with_default_ocr() -> Self {
        #[cfg(feature = "ocr")]
        {
            Self::new(TesseractOcr::new())
        }
        #[cfg(not(feature = "ocr"))]
        {
            Self::new(NoOcr)
        }
    }

    /// Replace the PDF text layer backend
    pub fn with_pdf_extractor(mut self, pdf: impl PdfExtractor + 'static) -> Self {
        self.pdf = Box::new(pdf);
        self
    }

    /// Replace the page image backend
    pub fn with_page_renderer(mut self, renderer: impl PageRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Extract the document's text, trimmed of surrounding whitespace
    pub fn extract(&self, document: &RawDocument) -> String {
        let text = match document.kind {
            DocumentKind::Pdf => self.extract_pdf(&document.bytes),
            DocumentKind::Image => self.ocr_or_empty(&document.bytes, &document.name),
            DocumentKind::PlainText => decode_utf8(&document.bytes, &document.name),
        };

        let text = text.trim().to_string();
        info!(
            name = %document.name,
            kind = document.kind.as_str(),
            chars = text.chars().count(),
            "Extracted document text"
        );
        text
    }

    fn extract_pdf(&self, bytes: &[u8]) -> String {
        let pages = match self.pdf.page_texts(bytes) {
            Ok(pages) => pages,
            Err(e) => {
                warn!(error = %e, "PDF text extraction failed, falling back to whole-file OCR");
                return self.ocr_or_empty(bytes, "pdf");
            }
        };

        let mut text = String::new();
        for (index, page_text) in pages.iter().enumerate() {
            if page_text.trim().is_empty() {
                debug!(page = index, "Page has no text layer, running OCR");
                match self.ocr_page(bytes, index) {
                    Ok(ocr_text) => text.push_str(&ocr_text),
                    Err(e) => {
                        warn!(page = index, error = %e, "Page OCR failed, falling back to whole-file OCR");
                        return match self.ocr.ocr_image(bytes) {
                            Ok(ocr_text) => ocr_text,
                            Err(e) => {
                                warn!(error = %e, "Whole-file OCR failed, keeping partial text");
                                text
                            }
                        };
                    }
                }
            } else {
                text.push_str(page_text);
            }
            text.push('\n');
        }
        text
    }

    fn ocr_page(&self, bytes: &[u8], index: usize) -> Result<String, TextError> {
        let image = self.renderer.render_page(bytes, index)?;
        self.ocr.ocr_image(&image)
    }

    fn ocr_or_empty(&self, bytes: &[u8], name: &str) -> String {
        self.ocr.ocr_image(bytes).unwrap_or_else(|e| {
            warn!(name = %name, error = %e, "OCR failed");
            String::new()
        })
    }
}

impl std::fmt::Debug for TextExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextExtractor").finish_non_exhaustive()
    }
}

fn decode_utf8(bytes: &[u8], name: &str) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            warn!(name = %name, error = %e, "File is not valid UTF-8");
            String::new()
        }
    }
}

#[cfg(test)]
pub(crate) mod test_pdf {
    //! Minimal PDFs built with lopdf

    use lopdf::dictionary;
    use lopdf::{Document, Object, ObjectId, Stream};

    fn finish(mut doc: Document, pages_id: ObjectId, page_ids: Vec<ObjectId>) -> Vec<u8> {
        let count = page_ids.len() as i64;
        for &page_id in &page_ids {
            if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(page_id) {
                dict.set("Parent", pages_id);
            }
        }
        let kids: Vec<Object> = page_ids.into_iter().map(Object::from).collect();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    /// One Helvetica text page per entry
    pub fn text_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let page_ids = pages
            .iter()
            .map(|text| {
                let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
                let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
                doc.add_object(dictionary! {
                    "Type" => "Page",
                    "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                    "Contents" => content_id,
                    "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
                })
            })
            .collect();

        finish(doc, pages_id, page_ids)
    }

    /// A single page holding only a gray image, like a scan
    pub fn scanned_pdf(width: u32, height: u32) -> Vec<u8> {
        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();

        let pixels = vec![128u8; (width * height) as usize];
        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            pixels,
        ));

        let content = format!("q {width} 0 0 {height} 0 0 cm /Im1 Do Q");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! { "XObject" => dictionary! { "Im1" => image_id } },
        });

        finish(doc, pages_id, vec![page_id])
    }
}
