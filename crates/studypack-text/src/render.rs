//! PDF page-to-image extraction for OCR
//!
//! Scanned PDFs carry one image XObject per page. Pulling that image out and
//! re-encoding it as PNG gives the OCR engine the page exactly as scanned,
//! without a full rasterizer.

use crate::TextError;
use image::{DynamicImage, ImageFormat};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::io::Cursor;
use tracing::debug;

/// Produces an encoded image of one PDF page
pub trait PageRenderer: Send + Sync {
    /// Render page `page_index` (0-based) of `pdf_bytes` to PNG bytes
    fn render_page(&self, pdf_bytes: &[u8], page_index: usize) -> Result<Vec<u8>, TextError>;
}

/// Extracts the largest embedded image of a page using lopdf
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfImageExtractor;

impl PageRenderer for LopdfImageExtractor {
    fn render_page(&self, pdf_bytes: &[u8], page_index: usize) -> Result<Vec<u8>, TextError> {
        let doc = Document::load_mem(pdf_bytes)
            .map_err(|e| TextError::PdfParsing(format!("Failed to parse PDF: {e}")))?;

        let page_ids: Vec<ObjectId> = doc.page_iter().collect();
        let &page_id = page_ids.get(page_index).ok_or_else(|| {
            TextError::PdfParsing(format!(
                "Page {} not found (PDF has {} pages)",
                page_index,
                page_ids.len()
            ))
        })?;

        let img = largest_page_image(&doc, page_id)?;
        let png = encode_png(&img)?;

        debug!(page = page_index, png_size = png.len(), "Extracted image from PDF page");

        Ok(png)
    }
}

/// Walk page → /Resources → /XObject and decode the largest /Image entry
fn largest_page_image(doc: &Document, page_id: ObjectId) -> Result<DynamicImage, TextError> {
    let page_dict = doc
        .get_object(page_id)
        .and_then(Object::as_dict)
        .map_err(|e| TextError::PdfParsing(format!("Page object error: {e}")))?;

    let resources = resolve_dict_entry(doc, page_dict, b"Resources")?;
    let xobjects = resolve_dict_entry(doc, resources, b"XObject")?;

    let mut largest: Option<(u64, DynamicImage)> = None;

    for (_name, obj) in xobjects.iter() {
        let stream = match resolve_object(doc, obj) {
            Object::Stream(s) => s,
            _ => continue,
        };

        if !is_image_subtype(&stream.dict) {
            continue;
        }

        let img = decode_image_stream(stream)?;
        let area = u64::from(img.width()) * u64::from(img.height());

        if largest.as_ref().map_or(true, |(prev, _)| area > *prev) {
            largest = Some((area, img));
        }
    }

    largest
        .map(|(_, img)| img)
        .ok_or_else(|| TextError::ImageProcessing("No image XObjects found on this page".into()))
}

fn is_image_subtype(dict: &Dictionary) -> bool {
    dict.get(b"Subtype")
        .map(|obj| matches!(obj, Object::Name(n) if n == b"Image"))
        .unwrap_or(false)
}

/// Decode an image stream: embedded JPEG/PNG/TIFF files first, raw samples second
fn decode_image_stream(stream: &lopdf::Stream) -> Result<DynamicImage, TextError> {
    // DCTDecode content is a complete JPEG file, so decompression may legitimately fail
    let content = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());

    if let Ok(img) = image::load_from_memory(&content) {
        return Ok(img);
    }

    reconstruct_raw_image(&stream.dict, content)
}

/// Rebuild an image from raw 8-bit samples using /Width, /Height and /ColorSpace
fn reconstruct_raw_image(dict: &Dictionary, raw: Vec<u8>) -> Result<DynamicImage, TextError> {
    let width = get_int(dict, b"Width")? as u32;
    let height = get_int(dict, b"Height")? as u32;
    let bpc = get_int(dict, b"BitsPerComponent").unwrap_or(8);
    if bpc != 8 {
        return Err(TextError::ImageProcessing(format!(
            "Unsupported bits per component: {bpc}"
        )));
    }

    let gray = matches!(dict.get(b"ColorSpace"), Ok(Object::Name(n)) if n == b"DeviceGray");
    let img = if gray {
        image::GrayImage::from_raw(width, height, raw).map(DynamicImage::ImageLuma8)
    } else {
        image::RgbImage::from_raw(width, height, raw).map(DynamicImage::ImageRgb8)
    };

    img.ok_or_else(|| {
        TextError::ImageProcessing(format!("Raw pixel buffer too small for {width}x{height}"))
    })
}

fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, TextError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| TextError::ImageProcessing(format!("PNG encode failed: {e}")))?;
    Ok(buf.into_inner())
}

/// Resolve a PDF object reference to its target, or return the object as-is
fn resolve_object<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

fn resolve_dict_entry<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Result<&'a Dictionary, TextError> {
    let name = String::from_utf8_lossy(key);
    let obj = dict
        .get(key)
        .map_err(|_| TextError::PdfParsing(format!("Missing /{name} in dictionary")))?;

    resolve_object(doc, obj)
        .as_dict()
        .map_err(|_| TextError::PdfParsing(format!("/{name} is not a dictionary")))
}

fn get_int(dict: &Dictionary, key: &[u8]) -> Result<i64, TextError> {
    let name = String::from_utf8_lossy(key);
    dict.get(key)
        .and_then(Object::as_i64)
        .map_err(|_| TextError::PdfParsing(format!("Missing or invalid /{name} in image dictionary")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_pdf;

    #[test]
    fn test_renderer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LopdfImageExtractor>();
    }

    #[test]
    fn test_render_scanned_page_to_png() {
        let pdf = test_pdf::scanned_pdf(4, 3);
        let png = LopdfImageExtractor.render_page(&pdf, 0).unwrap();

        let img = image::load_from_memory(&png).unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
    }

    #[test]
    fn test_page_without_images_is_an_error() {
        let pdf = test_pdf::text_pdf(&["just text"]);
        let result = LopdfImageExtractor.render_page(&pdf, 0);
        assert!(result.is_err());
    }

    #[test]
    fn test_page_out_of_range() {
        let pdf = test_pdf::scanned_pdf(2, 2);
        let result = LopdfImageExtractor.render_page(&pdf, 5);
        assert!(matches!(result, Err(TextError::PdfParsing(_))));
    }
}
