//! Text chunks

/// A read-only window over extracted text
///
/// `start` is a character offset (Unicode scalar values, not bytes) into the
/// source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Character offset of the first character of this window
    pub start: usize,

    /// Window contents
    pub text: String,
}

impl TextChunk {
    /// Create a chunk
    pub fn new(start: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            text: text.into(),
        }
    }

    /// Length of the window in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Character offset one past the last character of this window
    pub fn end(&self) -> usize {
        self.start + self.char_len()
    }
}
