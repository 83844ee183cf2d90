//! Error types.
//!
//! - [`ParseError`]: JSON text was not accepted.
//! - [`IndexError`]: a caller asked for an array slot past the end.
//! - [`CapacityError`]: a word-limited builder ran out of room.
//! - [`LayoutError`]: the packed buffer breaks its own format. Views treat
//!   this as fatal and panic; [`crate::Document::validate`] reports it.

use std::fmt;

/// Error returned when JSON text cannot be turned into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line, or 0 when the failure has no text position.
    pub line: usize,
    /// 1-based column, or 0 when the failure has no text position.
    pub column: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            f.write_str(&self.message)
        } else {
            write!(f, "{} at line {} column {}", self.message, self.line, self.column)
        }
    }
}

impl std::error::Error for ParseError {}

/// Array index outside `0..len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index out of range: {} (length {})", self.index, self.len)
    }
}

impl std::error::Error for IndexError {}

/// Builder ran out of its fixed word budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    pub needed: usize,
    pub limit: usize,
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "out of memory: document needs {} words, single allocation holds {}",
            self.needed, self.limit
        )
    }
}

impl std::error::Error for CapacityError {}

/// A violation of the packed buffer format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// Tag value outside the eight defined kinds.
    InvalidTag { bits: u8 },
    /// `base + offset` overflowed or landed past the end of the buffer.
    OffsetOutOfBounds { base: usize, offset: usize, len: usize },
    /// A payload needs `needed` words from `position` but the buffer ends first.
    Truncated { position: usize, needed: usize, len: usize },
    /// String or key range not within the text buffer.
    InvalidSpan { start: usize, end: usize, len: usize },
    /// String or key bytes are not UTF-8.
    InvalidUtf8 { start: usize, end: usize },
    /// Object entry `index` does not sort strictly after entry `index - 1`.
    UnsortedKeys { object: usize, index: usize },
    /// Object entry `index` repeats the key of entry `index - 1`.
    DuplicateKey { object: usize, index: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTag { bits } => write!(f, "unknown value type {bits}"),
            Self::OffsetOutOfBounds { base, offset, len } => write!(
                f,
                "offset {offset} from word {base} is outside the {len}-word buffer"
            ),
            Self::Truncated { position, needed, len } => write!(
                f,
                "payload at word {position} needs {needed} words but the buffer has {len}"
            ),
            Self::InvalidSpan { start, end, len } => {
                write!(f, "text range {start}..{end} is outside the {len}-byte text")
            }
            Self::InvalidUtf8 { start, end } => write!(f, "text range {start}..{end} is not utf-8"),
            Self::UnsortedKeys { object, index } => {
                write!(f, "object at word {object}: key {index} is out of order")
            }
            Self::DuplicateKey { object, index } => {
                write!(f, "object at word {object}: key {index} is a duplicate")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Abort on a corrupted buffer.
///
/// Views never hand back a [`LayoutError`]: finding one mid-traversal means
/// the buffer was not produced by a conforming encoder.
#[cold]
#[track_caller]
pub(crate) fn malformed(err: LayoutError) -> ! {
    panic!("decoded buffer is not well-formed: {err}")
}
