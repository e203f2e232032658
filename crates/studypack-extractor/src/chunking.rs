//! Overlapping fixed-size text windows
//!
//! Each window is `size` characters long. The next window starts `overlap`
//! characters before the previous one ended, so consecutive windows share
//! exactly `overlap` characters and the loop advances `size - overlap`
//! characters per step. Offsets count Unicode scalar values.

use crate::error::ExtractorError;
use studypack_domain::TextChunk;

/// Splits text into overlapping windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunker {
    size: usize,
    overlap: usize,
}

impl TextChunker {
    /// Create a chunker; `overlap` must be smaller than `size`
    pub fn new(size: usize, overlap: usize) -> Result<Self, ExtractorError> {
        if size == 0 {
            return Err(ExtractorError::Config(
                "chunk size must be greater than 0".to_string(),
            ));
        }
        if overlap >= size {
            return Err(ExtractorError::Config(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                overlap, size
            )));
        }
        Ok(Self { size, overlap })
    }

    /// Window size in characters
    pub fn size(&self) -> usize {
        self.size
    }

    /// Overlap in characters
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Chunk the given text; empty text yields no chunks
    pub fn chunk(&self, text: &str) -> Vec<TextChunk> {
        // Byte offset of every char boundary, including the end of the string
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = boundaries.len() - 1;

        let mut chunks = Vec::with_capacity(self.estimate(char_count));
        let mut start = 0;
        while start < char_count {
            let end = (start + self.size).min(char_count);
            chunks.push(TextChunk::new(
                start,
                &text[boundaries[start]..boundaries[end]],
            ));
            if end == char_count {
                break;
            }
            start = end - self.overlap;
        }
        chunks
    }

    fn estimate(&self, char_count: usize) -> usize {
        if char_count <= self.size {
            return 1;
        }
        let step = self.size - self.overlap;
        (char_count - self.overlap).div_ceil(step)
    }
}

/// Chunk `text` into plain strings
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Result<Vec<String>, ExtractorError> {
    let chunker = TextChunker::new(size, overlap)?;
    Ok(chunker.chunk(text).into_iter().map(|c| c.text).collect())
}
