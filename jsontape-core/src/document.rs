//! Ownership of a packed document.
//!
//! A [`Document`] is the only owner of the word buffer and the text buffer
//! its strings point into. Every view borrows from it, so the borrow
//! checker keeps views from outliving the buffers, and dropping the
//! document frees both exactly once.
//!
//! # Example
//!
//! ```
//! use jsontape_core::Document;
//!
//! let doc = Document::parse(br#"{"hello": "world", "n": [1, 2.5]}"#).unwrap();
//! let root = doc.root().as_object().unwrap();
//!
//! assert_eq!(root.get("hello").and_then(|v| v.as_str()), Some("world"));
//! assert!(root.get("missing").is_none());
//!
//! let n = root.get("n").and_then(|v| v.as_array()).unwrap();
//! assert_eq!(n.len(), 2);
//! assert_eq!(n.at(1).unwrap().as_f64(), Some(2.5));
//! ```

use std::fmt;
use std::sync::OnceLock;

use tracing::{debug, trace};

use crate::builder::TapeBuilder;
use crate::error::LayoutError;
use crate::node::NodeView;
use crate::tag::{Tag, Word};
use crate::tape::Tape;
use crate::validate;
use crate::value::Value;

/// A packed JSON document plus the text its strings refer to.
pub struct Document {
    tape: Tape,
    root_tag: Tag,
    root_position: usize,
    cache: OnceLock<Value>,
}

impl Document {
    pub(crate) fn from_tape(tape: Tape, root_tag: Tag, root_position: usize) -> Self {
        debug!(
            words = tape.words().len(),
            text_bytes = tape.text().len(),
            root = root_tag.name(),
            "document constructed"
        );
        Self {
            tape,
            root_tag,
            root_position,
            cache: OnceLock::new(),
        }
    }

    /// Parse JSON text with a growable buffer.
    #[cfg(feature = "serde")]
    pub fn parse(input: &[u8]) -> Result<Self, crate::error::ParseError> {
        crate::parse::parse(crate::parse::AllocationStrategy::Dynamic, input)
    }

    /// Take ownership of buffers produced by an external encoder.
    ///
    /// Only the root's own payload is checked, which keeps construction
    /// O(1). Call [`Document::validate`] before traversing a buffer that
    /// did not come from a trusted producer; otherwise a corrupt buffer is
    /// detected lazily and panics on access.
    pub fn from_parts(
        words: Vec<Word>,
        text: Vec<u8>,
        root_tag: Tag,
        root_position: usize,
    ) -> Result<Self, LayoutError> {
        let tape = Tape::new(words, text);
        tape.check_payload(root_tag, root_position)?;
        match root_tag {
            Tag::Array => {
                tape.container_len(root_position, 1)?;
            }
            Tag::Object => {
                tape.container_len(root_position, crate::tape::ENTRY_WORDS)?;
            }
            _ => {}
        }
        Ok(Self::from_tape(tape, root_tag, root_position))
    }

    /// Lay out an owned value as a new document.
    pub fn from_value(value: &Value) -> Self {
        match TapeBuilder::new().build(value) {
            Ok(doc) => doc,
            Err(err) => unreachable!("unbounded builder reported {err}"),
        }
    }

    /// The top-level node.
    #[inline]
    pub fn root(&self) -> NodeView<'_> {
        NodeView::new(&self.tape, self.root_tag, self.root_position)
    }

    /// Walk the whole buffer and report the first format violation.
    pub fn validate(&self) -> Result<(), LayoutError> {
        validate::validate(&self.tape, self.root_tag, self.root_position)
    }

    /// Decode the whole document into a fresh owned tree.
    pub fn materialize(&self) -> Value {
        trace!(root = self.root_tag.name(), "materializing document");
        self.root().materialize()
    }

    /// Decode the whole document once and keep the result.
    pub fn value(&self) -> &Value {
        self.cache.get_or_init(|| self.materialize())
    }

    /// The packed word buffer.
    #[inline]
    pub fn words(&self) -> &[Word] {
        self.tape.words()
    }

    /// The text buffer string payloads refer to.
    #[inline]
    pub fn text(&self) -> &[u8] {
        self.tape.text()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("root_tag", &self.root_tag)
            .field("root_position", &self.root_position)
            .field("words", &self.tape.words().len())
            .field("text_bytes", &self.tape.text().len())
            .finish()
    }
}

impl From<&Value> for Document {
    fn from(value: &Value) -> Self {
        Document::from_value(value)
    }
}
