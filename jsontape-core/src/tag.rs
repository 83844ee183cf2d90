//! Tagged words - the shared type-tag contract of the packed buffer.
//!
//! Every reference to a node is a single machine word: the low 3 bits hold
//! the node's [`Tag`] and the remaining high bits hold a relative offset,
//! in words, from the tagged word's own position to the node's payload.
//!
//! ```text
//!  high bits                              low 3 bits
//! ┌──────────────────────────────────────┬──────────┐
//! │ relative offset (word >> 3)          │   tag    │
//! └──────────────────────────────────────┴──────────┘
//! ```
//!
//! The producer ([`crate::builder`]) and the decoder (the views) both go
//! through this module, so the tag numbering exists exactly once.

use std::fmt;

use crate::error::LayoutError;

/// One slot of the packed buffer.
pub type Word = usize;

/// Number of low bits reserved for the tag.
pub const TAG_BITS: u32 = 3;

/// Mask selecting the tag bits of a word.
pub const TAG_MASK: Word = (1 << TAG_BITS) - 1;

/// Largest offset that still fits above the tag bits.
pub const MAX_OFFSET: usize = Word::MAX >> TAG_BITS;

/// Node kind stored in the low bits of a tagged word.
///
/// The discriminants are part of the buffer format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    Integer = 0,
    Double = 1,
    Null = 2,
    False = 3,
    True = 4,
    String = 5,
    Array = 6,
    Object = 7,
}

impl Tag {
    /// All tags in discriminant order.
    pub const ALL: [Tag; 8] = [
        Tag::Integer,
        Tag::Double,
        Tag::Null,
        Tag::False,
        Tag::True,
        Tag::String,
        Tag::Array,
        Tag::Object,
    ];

    /// Decode a tag from its numeric value, rejecting anything outside 0..=7.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Tag> {
        Tag::ALL.get(bits as usize).copied()
    }

    /// Numeric value of this tag.
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Number of payload words a node of this kind starts with.
    ///
    /// Arrays and objects report only their count word; their full extent
    /// depends on the count.
    #[inline]
    pub const fn payload_words(self) -> usize {
        match self {
            Tag::Null | Tag::False | Tag::True => 0,
            Tag::Integer | Tag::Array | Tag::Object => 1,
            Tag::Double | Tag::String => 2,
        }
    }

    /// True for arrays and objects.
    #[inline]
    pub const fn is_container(self) -> bool {
        matches!(self, Tag::Array | Tag::Object)
    }

    /// Lowercase name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Tag::Integer => "integer",
            Tag::Double => "double",
            Tag::Null => "null",
            Tag::False => "false",
            Tag::True => "true",
            Tag::String => "string",
            Tag::Array => "array",
            Tag::Object => "object",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name())
    }
}

impl TryFrom<u8> for Tag {
    type Error = LayoutError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Tag::from_bits(bits).ok_or(LayoutError::InvalidTag { bits })
    }
}

/// A decoded tagged word: node kind plus relative payload offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedWord {
    pub tag: Tag,
    pub offset: usize,
}

impl TaggedWord {
    /// Pack a tag and offset into a word.
    ///
    /// Returns `None` when the offset does not fit above the tag bits.
    #[inline]
    pub fn encode(tag: Tag, offset: usize) -> Option<Word> {
        if offset > MAX_OFFSET {
            return None;
        }
        Some((offset << TAG_BITS) | tag.bits() as Word)
    }

    /// Split a word into tag and offset.
    #[inline]
    pub fn decode(word: Word) -> TaggedWord {
        let tag = match word & TAG_MASK {
            0 => Tag::Integer,
            1 => Tag::Double,
            2 => Tag::Null,
            3 => Tag::False,
            4 => Tag::True,
            5 => Tag::String,
            6 => Tag::Array,
            7 => Tag::Object,
            _ => unreachable!("tag mask keeps three bits"),
        };
        TaggedWord {
            tag,
            offset: word >> TAG_BITS,
        }
    }
}

/// Resolve the absolute position of a payload from the position of the
/// tagged word that references it.
///
/// Fails if the addition overflows or the result lies outside a buffer of
/// `len` words. Payload-less tags only need the position itself to be
/// representable, since nothing is read there.
#[inline]
pub fn locate(base: usize, offset: usize, len: usize) -> Result<usize, LayoutError> {
    match base.checked_add(offset) {
        Some(position) if position < len => Ok(position),
        _ => Err(LayoutError::OffsetOutOfBounds { base, offset, len }),
    }
}
