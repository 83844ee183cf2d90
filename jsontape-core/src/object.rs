//! Object payloads: a count word followed by one entry per member.
//!
//! ```text
//! position:  [ n ][ key_start ][ key_end ][ tag|off ] ... (n entries)
//! ```
//!
//! Entries are sorted ascending by the key's bytes and keys are unique,
//! which lets [`ObjectView::get`] binary search instead of scanning. The
//! value word's offset is relative to the value word itself.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::iter::FusedIterator;

use crate::node::NodeView;
use crate::tape::{OrMalformed, Tape, ENTRY_WORDS};
use crate::value::Value;

/// Borrowed view over an object node.
#[derive(Clone, Copy)]
pub struct ObjectView<'a> {
    tape: &'a Tape,
    position: usize,
    len: usize,
}

impl<'a> ObjectView<'a> {
    /// Read the count word and check that every entry is inside the buffer.
    #[track_caller]
    pub(crate) fn new(tape: &'a Tape, position: usize) -> Self {
        let len = tape.container_len(position, ENTRY_WORDS).or_malformed();
        Self { tape, position, len }
    }

    /// Number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Look up a member by key in O(log n) key comparisons.
    ///
    /// A missing key is `None`, not an error.
    #[inline]
    pub fn get(&self, key: &str) -> Option<NodeView<'a>> {
        self.find(key).map(|index| self.value_unchecked(index))
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Position of `key` in the sorted entry list.
    pub fn find(&self, key: &str) -> Option<usize> {
        let needle = key.as_bytes();
        let mut low = 0;
        let mut high = self.len;
        while low < high {
            let mid = low + (high - low) / 2;
            match self.key_bytes(mid).cmp(needle) {
                Ordering::Less => low = mid + 1,
                Ordering::Greater => high = mid,
                Ordering::Equal => return Some(mid),
            }
        }
        None
    }

    /// Key of entry `index`, in sorted order.
    #[inline]
    pub fn key_at(&self, index: usize) -> Option<&'a str> {
        (index < self.len).then(|| self.key_unchecked(index))
    }

    /// Value of entry `index`, in sorted order.
    #[inline]
    pub fn value_at(&self, index: usize) -> Option<NodeView<'a>> {
        (index < self.len).then(|| self.value_unchecked(index))
    }

    /// Iterate `(key, value)` pairs in stored order. Each call starts over.
    #[inline]
    pub fn entries(&self) -> Entries<'a> {
        Entries {
            object: *self,
            front: 0,
            back: self.len,
        }
    }

    /// Iterate keys in stored order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &'a str> + 'a {
        let object = *self;
        (0..self.len).map(move |index| object.key_unchecked(index))
    }

    /// Decode every member into an owned map.
    ///
    /// This forces every value to be materialized; prefer [`ObjectView::get`]
    /// when only a few members are needed.
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        self.entries()
            .map(|(key, value)| (key.to_owned(), value.materialize()))
            .collect()
    }

    #[inline]
    fn entry(&self, index: usize) -> usize {
        self.position + 1 + index * ENTRY_WORDS
    }

    #[track_caller]
    fn key_bytes(&self, index: usize) -> &'a [u8] {
        let tape = self.tape;
        let span = tape.span(self.entry(index)).or_malformed();
        tape.bytes(span).or_malformed()
    }

    #[track_caller]
    fn key_unchecked(&self, index: usize) -> &'a str {
        let tape = self.tape;
        let span = tape.span(self.entry(index)).or_malformed();
        tape.str(span).or_malformed()
    }

    #[inline]
    #[track_caller]
    fn value_unchecked(&self, index: usize) -> NodeView<'a> {
        NodeView::from_slot(self.tape, self.entry(index) + 2)
    }
}

impl fmt::Debug for ObjectView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectView")
            .field("position", &self.position)
            .field("len", &self.len)
            .finish()
    }
}

impl<'a> IntoIterator for ObjectView<'a> {
    type Item = (&'a str, NodeView<'a>);
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

/// Iterator over the members of an [`ObjectView`].
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    object: ObjectView<'a>,
    front: usize,
    back: usize,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a str, NodeView<'a>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let index = self.front;
        self.front += 1;
        Some((
            self.object.key_unchecked(index),
            self.object.value_unchecked(index),
        ))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Entries<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some((
            self.object.key_unchecked(self.back),
            self.object.value_unchecked(self.back),
        ))
    }
}

impl ExactSizeIterator for Entries<'_> {}

impl FusedIterator for Entries<'_> {}
