//! OCR engines

use crate::TextError;

/// Optical character recognition over encoded image bytes
pub trait OcrEngine: Send + Sync {
    /// Recognize the text in an encoded image (PNG, JPEG, TIFF, ...)
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<String, TextError>;
}

/// Placeholder engine for builds without Tesseract; every call fails
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOcr;

impl OcrEngine for NoOcr {
    fn ocr_image(&self, _image_bytes: &[u8]) -> Result<String, TextError> {
        Err(TextError::OcrUnavailable)
    }
}

/// Tesseract OCR engine.
/// Only available when compiled with the `ocr` feature flag.
#[cfg(feature = "ocr")]
pub struct TesseractOcr {
    tessdata_dir: Option<std::path::PathBuf>,
    lang: String,
}

#[cfg(feature = "ocr")]
impl TesseractOcr {
    /// Use the system tessdata location and English
    pub fn new() -> Self {
        Self {
            tessdata_dir: None,
            lang: "eng".to_string(),
        }
    }

    /// Use an explicit tessdata directory
    pub fn with_tessdata_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.tessdata_dir = Some(dir.into());
        self
    }

    /// Set language(s) for OCR (e.g., "eng", "eng+fra")
    pub fn with_languages(mut self, langs: &str) -> Self {
        self.lang = langs.to_string();
        self
    }
}

#[cfg(feature = "ocr")]
impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "ocr")]
impl OcrEngine for TesseractOcr {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<String, TextError> {
        let datapath = match &self.tessdata_dir {
            Some(dir) => Some(
                dir.to_str()
                    .ok_or_else(|| TextError::OcrInit("Invalid tessdata path".into()))?,
            ),
            None => None,
        };

        let tess = tesseract::Tesseract::new(datapath, Some(&self.lang))
            .map_err(|e| TextError::OcrInit(format!("{e:?}")))?;

        let mut tess = tess
            .set_image_from_mem(image_bytes)
            .map_err(|e| TextError::OcrProcessing(format!("{e:?}")))?;

        tess.get_text()
            .map_err(|e| TextError::OcrProcessing(format!("{e:?}")))
    }
}

/// Mock OCR engine for testing without Tesseract
///
/// Returns the same text for every image and counts calls.
#[derive(Debug, Default)]
pub struct MockOcrEngine {
    text: Option<String>,
    calls: std::sync::atomic::AtomicUsize,
}

impl MockOcrEngine {
    /// Engine that recognizes `text` in every image
    pub fn new(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            calls: Default::default(),
        }
    }

    /// Engine that fails on every image
    pub fn failing() -> Self {
        Self::default()
    }

    /// Number of images seen so far
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl OcrEngine for MockOcrEngine {
    fn ocr_image(&self, _image_bytes: &[u8]) -> Result<String, TextError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.text
            .clone()
            .ok_or_else(|| TextError::OcrProcessing("mock OCR failure".into()))
    }
}
