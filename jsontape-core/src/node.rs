//! Borrowed handle over a single node of the packed buffer.

use std::fmt;

use crate::array::ArrayView;
use crate::object::ObjectView;
use crate::tag::Tag;
use crate::tape::{OrMalformed, Tape};
use crate::value::Value;

/// A lightweight, copyable reference to one node.
///
/// Holds the node's tag and the word position of its payload. Nothing is
/// decoded until an accessor asks for it, and containers are only expanded
/// one level at a time.
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    tape: &'a Tape,
    tag: Tag,
    position: usize,
}

/// A node decoded one level deep.
///
/// Scalars are fully decoded; arrays and objects come back as views so
/// their children stay untouched until accessed.
#[derive(Debug, Clone, Copy)]
pub enum ShallowValue<'a> {
    Integer(i32),
    Double(f64),
    Null,
    Bool(bool),
    String(&'a str),
    Array(ArrayView<'a>),
    Object(ObjectView<'a>),
}

impl<'a> NodeView<'a> {
    #[inline]
    pub(crate) fn new(tape: &'a Tape, tag: Tag, position: usize) -> Self {
        Self { tape, tag, position }
    }

    /// Build a view for the tagged word stored at `slot`.
    #[inline]
    #[track_caller]
    pub(crate) fn from_slot(tape: &'a Tape, slot: usize) -> Self {
        let (tag, position) = tape.slot(slot).or_malformed();
        Self::new(tape, tag, position)
    }

    /// The node's kind.
    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Word position of the node's payload.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Decode this node one level deep.
    pub fn shallow(&self) -> ShallowValue<'a> {
        match self.tag {
            Tag::Integer => ShallowValue::Integer(self.tape.integer(self.position).or_malformed()),
            Tag::Double => ShallowValue::Double(self.tape.double(self.position).or_malformed()),
            Tag::Null => ShallowValue::Null,
            Tag::False => ShallowValue::Bool(false),
            Tag::True => ShallowValue::Bool(true),
            Tag::String => ShallowValue::String(self.string_str()),
            Tag::Array => ShallowValue::Array(ArrayView::new(self.tape, self.position)),
            Tag::Object => ShallowValue::Object(ObjectView::new(self.tape, self.position)),
        }
    }

    /// Recursively copy this node into an owned [`Value`].
    pub fn materialize(&self) -> Value {
        Value::from(*self)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.tag == Tag::Null
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self.tag {
            Tag::True => Some(true),
            Tag::False => Some(false),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i32(&self) -> Option<i32> {
        match self.tag {
            Tag::Integer => Some(self.tape.integer(self.position).or_malformed()),
            _ => None,
        }
    }

    /// The value of a double node. Integers are not widened; see
    /// [`NodeView::as_number`].
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self.tag {
            Tag::Double => Some(self.tape.double(self.position).or_malformed()),
            _ => None,
        }
    }

    /// Either numeric kind as a double.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self.tag {
            Tag::Integer => self.as_i32().map(f64::from),
            Tag::Double => self.as_f64(),
            _ => None,
        }
    }

    /// Raw bytes of a string node, without UTF-8 validation.
    #[inline]
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self.tag {
            Tag::String => Some(self.string_bytes()),
            _ => None,
        }
    }

    /// Text of a string node.
    #[inline]
    pub fn as_str(&self) -> Option<&'a str> {
        match self.tag {
            Tag::String => Some(self.string_str()),
            _ => None,
        }
    }

    /// Byte length of a string node, read from its offsets alone.
    #[inline]
    pub fn string_len(&self) -> Option<usize> {
        match self.tag {
            Tag::String => Some(self.tape.span(self.position).or_malformed().len()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<ArrayView<'a>> {
        match self.tag {
            Tag::Array => Some(ArrayView::new(self.tape, self.position)),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<ObjectView<'a>> {
        match self.tag {
            Tag::Object => Some(ObjectView::new(self.tape, self.position)),
            _ => None,
        }
    }

    #[track_caller]
    fn string_bytes(&self) -> &'a [u8] {
        let tape = self.tape;
        let span = tape.span(self.position).or_malformed();
        tape.bytes(span).or_malformed()
    }

    #[track_caller]
    fn string_str(&self) -> &'a str {
        let tape = self.tape;
        let span = tape.span(self.position).or_malformed();
        tape.str(span).or_malformed()
    }
}

impl fmt::Debug for NodeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeView")
            .field("tag", &self.tag)
            .field("position", &self.position)
            .finish()
    }
}

impl<'a> ShallowValue<'a> {
    /// Kind of the decoded node.
    pub fn tag(&self) -> Tag {
        match self {
            Self::Integer(_) => Tag::Integer,
            Self::Double(_) => Tag::Double,
            Self::Null => Tag::Null,
            Self::Bool(false) => Tag::False,
            Self::Bool(true) => Tag::True,
            Self::String(_) => Tag::String,
            Self::Array(_) => Tag::Array,
            Self::Object(_) => Tag::Object,
        }
    }
}
