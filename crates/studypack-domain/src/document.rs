//! Uploaded documents

use crate::DocumentId;
use std::fmt;
use std::path::Path;

/// Detected kind of an uploaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// PDF, possibly scanned
    Pdf,
    /// Raster image (PNG, JPEG, GIF, BMP, TIFF)
    Image,
    /// Anything else, read as UTF-8 text
    PlainText,
}

/// File extensions routed to OCR
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tiff"];

impl DocumentKind {
    /// Detect the kind from a file name's extension (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use studypack_domain::DocumentKind;
    ///
    /// assert_eq!(DocumentKind::from_name("notes.PDF"), DocumentKind::Pdf);
    /// assert_eq!(DocumentKind::from_name("scan.jpeg"), DocumentKind::Image);
    /// assert_eq!(DocumentKind::from_name("README"), DocumentKind::PlainText);
    /// ```
    pub fn from_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("pdf") => DocumentKind::Pdf,
            Some(e) if IMAGE_EXTENSIONS.contains(&e) => DocumentKind::Image,
            _ => DocumentKind::PlainText,
        }
    }

    /// Stable lowercase name used in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Image => "image",
            DocumentKind::PlainText => "plain-text",
        }
    }

    /// Parse the storage name back into a kind
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pdf" => Some(DocumentKind::Pdf),
            "image" => Some(DocumentKind::Image),
            "plain-text" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uploaded document: immutable bytes plus the detected kind
///
/// Produced by the document store, consumed once by the text extractor.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Identifier in the document store
    pub id: DocumentId,

    /// Original file name, used for kind detection and display
    pub name: String,

    /// Detected kind
    pub kind: DocumentKind,

    /// File contents
    pub bytes: Vec<u8>,
}

impl RawDocument {
    /// Create a document, detecting its kind from the name
    pub fn new(id: DocumentId, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let kind = DocumentKind::from_name(&name);
        Self { id, name, kind, bytes }
    }
}
