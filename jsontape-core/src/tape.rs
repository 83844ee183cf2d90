//! The arena behind every view: one contiguous word buffer plus the text
//! buffer that string payloads and keys point into.
//!
//! Views store plain word positions into this arena instead of addresses.
//! Every read goes through the checked accessors below, so a bad offset in
//! the buffer turns into a [`LayoutError`] rather than an out-of-bounds
//! access. The validator consumes those errors directly; the views escalate
//! them with [`OrMalformed::or_malformed`].

use crate::error::{malformed, LayoutError};
use crate::number;
use crate::span::Span;
use crate::tag::{locate, Tag, TaggedWord, Word};

/// Words per object entry: key start, key end, tagged value.
pub(crate) const ENTRY_WORDS: usize = 3;

#[derive(Debug)]
pub(crate) struct Tape {
    words: Box<[Word]>,
    text: Box<[u8]>,
}

impl Tape {
    pub(crate) fn new(words: Vec<Word>, text: Vec<u8>) -> Self {
        Self {
            words: words.into_boxed_slice(),
            text: text.into_boxed_slice(),
        }
    }

    #[inline]
    pub(crate) fn words(&self) -> &[Word] {
        &self.words
    }

    #[inline]
    pub(crate) fn text(&self) -> &[u8] {
        &self.text
    }

    /// Check that `needed` words starting at `position` exist.
    #[inline]
    pub(crate) fn require(&self, position: usize, needed: usize) -> Result<(), LayoutError> {
        match position.checked_add(needed) {
            Some(end) if end <= self.words.len() => Ok(()),
            _ => Err(LayoutError::Truncated {
                position,
                needed,
                len: self.words.len(),
            }),
        }
    }

    /// Read a single word.
    #[inline]
    pub(crate) fn read(&self, position: usize) -> Result<Word, LayoutError> {
        self.words.get(position).copied().ok_or(LayoutError::Truncated {
            position,
            needed: 1,
            len: self.words.len(),
        })
    }

    /// Decode the tagged word at `position` and resolve its payload position.
    ///
    /// Null and boolean nodes have no payload; their location is reported
    /// as the slot itself whatever offset the producer stored.
    #[inline]
    pub(crate) fn slot(&self, position: usize) -> Result<(Tag, usize), LayoutError> {
        let TaggedWord { tag, offset } = TaggedWord::decode(self.read(position)?);
        if tag.payload_words() == 0 {
            return Ok((tag, position));
        }
        let payload = locate(position, offset, self.words.len())?;
        Ok((tag, payload))
    }

    /// Check that a node of kind `tag` has its fixed payload words in bounds.
    #[inline]
    pub(crate) fn check_payload(&self, tag: Tag, position: usize) -> Result<(), LayoutError> {
        self.require(position, tag.payload_words())
    }

    /// Read the element count of a container and check that all its slots
    /// (`stride` words each) fit in the buffer.
    pub(crate) fn container_len(&self, position: usize, stride: usize) -> Result<usize, LayoutError> {
        let len = self.read(position)?;
        let truncated = LayoutError::Truncated {
            position,
            needed: usize::MAX,
            len: self.words.len(),
        };
        let slots = len.checked_mul(stride).ok_or(truncated)?;
        let needed = slots.checked_add(1).ok_or(truncated)?;
        self.require(position, needed)?;
        Ok(len)
    }

    #[inline]
    pub(crate) fn integer(&self, position: usize) -> Result<i32, LayoutError> {
        Ok(number::decode_integer(self.read(position)?))
    }

    #[inline]
    pub(crate) fn double(&self, position: usize) -> Result<f64, LayoutError> {
        self.require(position, 2)?;
        Ok(number::decode_double(self.words[position], self.words[position + 1]))
    }

    /// Read a `(start, end)` pair of text offsets.
    #[inline]
    pub(crate) fn span(&self, position: usize) -> Result<Span, LayoutError> {
        self.require(position, 2)?;
        Ok(Span::new(self.words[position], self.words[position + 1]))
    }

    #[inline]
    pub(crate) fn bytes(&self, span: Span) -> Result<&[u8], LayoutError> {
        span.slice(&self.text)
    }

    #[inline]
    pub(crate) fn str(&self, span: Span) -> Result<&str, LayoutError> {
        span.as_str(&self.text)
    }
}

/// Turn a layout violation found during traversal into a panic.
pub(crate) trait OrMalformed<T> {
    fn or_malformed(self) -> T;
}

impl<T> OrMalformed<T> for Result<T, LayoutError> {
    #[inline]
    #[track_caller]
    fn or_malformed(self) -> T {
        match self {
            Ok(value) => value,
            Err(err) => malformed(err),
        }
    }
}
