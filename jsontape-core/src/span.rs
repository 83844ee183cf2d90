//! Byte ranges into the document's text buffer.
//!
//! String payloads and object keys do not live in the word buffer; they are
//! `(start, end)` pairs pointing into the text that accompanies it.

use crate::error::LayoutError;

/// A half-open byte range `start..end` into the text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes (zero for an inverted range).
    #[inline]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the bytes of this span.
    ///
    /// Requires `start <= end <= text.len()`.
    #[inline]
    pub fn slice<'a>(&self, text: &'a [u8]) -> Result<&'a [u8], LayoutError> {
        if self.start <= self.end && self.end <= text.len() {
            Ok(&text[self.start..self.end])
        } else {
            Err(LayoutError::InvalidSpan {
                start: self.start,
                end: self.end,
                len: text.len(),
            })
        }
    }

    /// Borrow the span as UTF-8 text.
    #[inline]
    pub fn as_str<'a>(&self, text: &'a [u8]) -> Result<&'a str, LayoutError> {
        let bytes = self.slice(text)?;
        std::str::from_utf8(bytes).map_err(|_| LayoutError::InvalidUtf8 {
            start: self.start,
            end: self.end,
        })
    }
}
