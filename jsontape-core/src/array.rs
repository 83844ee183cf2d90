//! Array payloads: a length word followed by one tagged word per element.
//!
//! ```text
//! position:  [ n ][ tag|off ][ tag|off ] ... [ tag|off ]
//!                   slot 0     slot 1          slot n-1
//! ```
//!
//! Each slot's offset is relative to the slot itself.

use std::fmt;
use std::iter::FusedIterator;

use crate::error::IndexError;
use crate::node::NodeView;
use crate::tape::{OrMalformed, Tape};
use crate::value::Value;

/// Borrowed view over an array node.
#[derive(Clone, Copy)]
pub struct ArrayView<'a> {
    tape: &'a Tape,
    position: usize,
    len: usize,
}

impl<'a> ArrayView<'a> {
    /// Read the length word and check that every slot is inside the buffer.
    #[track_caller]
    pub(crate) fn new(tape: &'a Tape, position: usize) -> Self {
        let len = tape.container_len(position, 1).or_malformed();
        Self { tape, position, len }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Element `index`, or an [`IndexError`] when `index >= len()`.
    #[inline]
    pub fn at(&self, index: usize) -> Result<NodeView<'a>, IndexError> {
        if index >= self.len {
            return Err(IndexError {
                index,
                len: self.len,
            });
        }
        Ok(NodeView::from_slot(self.tape, self.position + 1 + index))
    }

    /// Element `index`, or `None` when out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<NodeView<'a>> {
        self.at(index).ok()
    }

    /// Iterate over the elements in order. Each call starts from the front.
    #[inline]
    pub fn iter(&self) -> ArrayIter<'a> {
        ArrayIter {
            array: *self,
            front: 0,
            back: self.len,
        }
    }

    /// Materialize every element.
    pub fn to_vec(&self) -> Vec<Value> {
        self.iter().map(|node| node.materialize()).collect()
    }
}

impl fmt::Debug for ArrayView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayView")
            .field("position", &self.position)
            .field("len", &self.len)
            .finish()
    }
}

impl<'a> IntoIterator for ArrayView<'a> {
    type Item = NodeView<'a>;
    type IntoIter = ArrayIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of an [`ArrayView`].
#[derive(Debug, Clone)]
pub struct ArrayIter<'a> {
    array: ArrayView<'a>,
    front: usize,
    back: usize,
}

impl<'a> Iterator for ArrayIter<'a> {
    type Item = NodeView<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let node = self.array.get(self.front);
        self.front += 1;
        node
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for ArrayIter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        self.array.get(self.back)
    }
}

impl ExactSizeIterator for ArrayIter<'_> {}

impl FusedIterator for ArrayIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::encode_integer;
    use crate::tag::{Tag, TaggedWord, Word};

    fn tagged(tag: Tag, offset: usize) -> Word {
        TaggedWord::encode(tag, offset).unwrap()
    }

    /// `[10, null, 20]` laid out by hand.
    fn sample() -> Tape {
        let words = vec![
            3,
            tagged(Tag::Integer, 3), // slot 0 at 1 -> 4
            tagged(Tag::Null, 0),    // slot 1 at 2
            tagged(Tag::Integer, 2), // slot 2 at 3 -> 5
            encode_integer(10),
            encode_integer(20),
        ];
        Tape::new(words, vec![])
    }

    #[test]
    fn test_len_and_at() {
        let tape = sample();
        let array = ArrayView::new(&tape, 0);
        assert_eq!(array.len(), 3);
        assert_eq!(array.at(0).unwrap().as_i32(), Some(10));
        assert!(array.at(1).unwrap().is_null());
        assert_eq!(array.at(2).unwrap().as_i32(), Some(20));
    }

    #[test]
    fn test_at_out_of_range() {
        let tape = sample();
        let array = ArrayView::new(&tape, 0);
        assert_eq!(array.at(3).unwrap_err(), IndexError { index: 3, len: 3 });
        assert!(array.get(usize::MAX).is_none());
    }

    #[test]
    fn test_iter_is_restartable() {
        let tape = sample();
        let array = ArrayView::new(&tape, 0);
        let first: Vec<Tag> = array.iter().map(|n| n.tag()).collect();
        let second: Vec<Tag> = array.iter().map(|n| n.tag()).collect();
        assert_eq!(first, vec![Tag::Integer, Tag::Null, Tag::Integer]);
        assert_eq!(first, second);
        assert_eq!(array.iter().len(), 3);
    }

    #[test]
    fn test_iter_from_both_ends() {
        let tape = sample();
        let mut iter = ArrayView::new(&tape, 0).iter();
        assert_eq!(iter.next_back().and_then(|n| n.as_i32()), Some(20));
        assert_eq!(iter.next().and_then(|n| n.as_i32()), Some(10));
        assert!(iter.next().unwrap().is_null());
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
    }

    #[test]
    fn test_empty() {
        let tape = Tape::new(vec![0], vec![]);
        let array = ArrayView::new(&tape, 0);
        assert!(array.is_empty());
        assert_eq!(array.iter().count(), 0);
        assert!(array.at(0).is_err());
    }

    #[test]
    #[should_panic(expected = "decoded buffer is not well-formed")]
    fn test_length_past_buffer_is_fatal() {
        let tape = Tape::new(vec![5, 0], vec![]);
        ArrayView::new(&tape, 0);
    }
}
