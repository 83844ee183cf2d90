//! Producer side of the buffer format: lays an owned [`Value`] out as a
//! packed tape.
//!
//! Containers are written header first. Their slots are reserved as
//! placeholders, then each child payload is appended after the slots and
//! the slot is patched with the forward distance to it. Every offset is
//! therefore relative to the slot that holds it, and never negative.
//!
//! Object members come out of the `BTreeMap` in ascending key-byte order,
//! which is the order lookups binary search over.

use crate::document::Document;
use crate::error::CapacityError;
use crate::number;
use crate::tag::{TaggedWord, Word};
use crate::tape::{Tape, ENTRY_WORDS};
use crate::value::Value;

/// Encodes owned values into [`Document`]s.
#[derive(Debug, Default)]
pub struct TapeBuilder {
    words: Vec<Word>,
    text: Vec<u8>,
    limit: Option<usize>,
}

impl TapeBuilder {
    /// Builder whose word buffer grows as needed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder that makes one allocation of `limit` words and refuses
    /// anything larger.
    pub fn with_word_limit(limit: usize) -> Self {
        Self {
            words: Vec::with_capacity(limit),
            text: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Lay out `value` and hand the buffers to a new document.
    pub fn build(mut self, value: &Value) -> Result<Document, CapacityError> {
        let needed = words_needed(value);
        if let Some(limit) = self.limit {
            if needed > limit {
                return Err(CapacityError { needed, limit });
            }
        }
        self.words.reserve_exact(needed);
        self.text.reserve(text_needed(value));

        let root_position = self.write(value);
        let root_tag = value.kind();
        debug_assert_eq!(self.words.len(), needed);
        Ok(Document::from_tape(
            Tape::new(self.words, self.text),
            root_tag,
            root_position,
        ))
    }

    /// Append the payload of `value` and everything below it, and return
    /// the position of that payload. Payload-less values report the current
    /// end of the buffer and write nothing.
    ///
    /// Children are laid out depth first in member order from an explicit
    /// stack of unpatched slots, so nesting depth is bounded by memory.
    fn write(&mut self, value: &Value) -> usize {
        let mut pending = Vec::new();
        let position = self.write_payload(value, &mut pending);
        while let Some((slot, child)) = pending.pop() {
            let tag = child.kind();
            let offset = if tag.payload_words() == 0 {
                0
            } else {
                self.write_payload(child, &mut pending) - slot
            };
            self.words[slot] = match TaggedWord::encode(tag, offset) {
                Some(word) => word,
                None => unreachable!("a Vec<Word> never holds more than MAX_OFFSET words"),
            };
        }
        position
    }

    /// Append the payload of `value` alone. Container slots are left as
    /// placeholders and queued on `pending`, first child on top.
    fn write_payload<'v>(&mut self, value: &'v Value, pending: &mut Vec<(usize, &'v Value)>) -> usize {
        let position = self.words.len();
        match value {
            Value::Integer(i) => self.words.push(number::encode_integer(*i)),
            Value::Double(d) => self.words.extend_from_slice(&number::encode_double(*d)),
            Value::Null | Value::Bool(_) => {}
            Value::String(s) => self.push_text(s),
            Value::Array(items) => {
                self.words.push(items.len());
                let first_slot = self.words.len();
                self.words.resize(first_slot + items.len(), 0);
                pending.extend(
                    items
                        .iter()
                        .enumerate()
                        .rev()
                        .map(|(index, item)| (first_slot + index, item)),
                );
            }
            Value::Object(members) => {
                self.words.push(members.len());
                let first_entry = self.words.len();
                for key in members.keys() {
                    self.push_text(key);
                    self.words.push(0);
                }
                pending.extend(
                    members
                        .values()
                        .enumerate()
                        .rev()
                        .map(|(index, item)| (first_entry + index * ENTRY_WORDS + 2, item)),
                );
            }
        }
        position
    }

    /// Copy `s` into the text buffer and push its `(start, end)` pair.
    fn push_text(&mut self, s: &str) {
        let start = self.text.len();
        self.text.extend_from_slice(s.as_bytes());
        self.words.push(start);
        self.words.push(self.text.len());
    }
}

/// Exact number of words [`TapeBuilder::build`] writes for `value`.
pub fn words_needed(value: &Value) -> usize {
    let mut total = 0;
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        total += value.kind().payload_words();
        match value {
            Value::Array(items) => {
                total += items.len();
                pending.extend(items);
            }
            Value::Object(members) => {
                total += members.len() * ENTRY_WORDS;
                pending.extend(members.values());
            }
            _ => {}
        }
    }
    total
}

fn text_needed(value: &Value) -> usize {
    let mut total = 0;
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value {
            Value::String(s) => total += s.len(),
            Value::Array(items) => pending.extend(items),
            Value::Object(members) => {
                total += members.keys().map(String::len).sum::<usize>();
                pending.extend(members.values());
            }
            _ => {}
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Tag;
    use std::collections::BTreeMap;

    fn tagged(tag: Tag, offset: usize) -> Word {
        TaggedWord::encode(tag, offset).unwrap()
    }

    #[test]
    fn test_array_layout() {
        let value = Value::Array(vec![Value::Integer(10), Value::from("Hello")]);
        let doc = TapeBuilder::new().build(&value).unwrap();
        assert_eq!(
            doc.words(),
            &[
                2,
                tagged(Tag::Integer, 2), // slot 1 -> 3
                tagged(Tag::String, 2),  // slot 2 -> 4
                number::encode_integer(10),
                0,
                5,
            ]
        );
        assert_eq!(doc.text(), b"Hello");
    }

    #[test]
    fn test_object_layout_is_key_sorted() {
        let value: Value = [("b", Value::Null), ("a", Value::Integer(1))]
            .into_iter()
            .collect();
        let doc = TapeBuilder::new().build(&value).unwrap();
        assert_eq!(
            doc.words(),
            &[
                2,
                0,
                1,
                tagged(Tag::Integer, 4), // word 3 -> 7
                1,
                2,
                tagged(Tag::Null, 0),
                number::encode_integer(1),
            ]
        );
        assert_eq!(doc.text(), b"ab");
    }

    #[test]
    fn test_nested_offsets() {
        let value = Value::Array(vec![Value::Array(vec![Value::Double(1.5)])]);
        let doc = TapeBuilder::new().build(&value).unwrap();
        let [lo, hi] = number::encode_double(1.5);
        assert_eq!(
            doc.words(),
            &[1, tagged(Tag::Array, 1), 1, tagged(Tag::Double, 1), lo, hi]
        );
    }

    #[test]
    fn test_scalar_root() {
        let doc = TapeBuilder::new().build(&Value::Bool(true)).unwrap();
        assert!(doc.words().is_empty());
        assert_eq!(doc.root().as_bool(), Some(true));

        let doc = TapeBuilder::new().build(&Value::from("x")).unwrap();
        assert_eq!(doc.root().as_str(), Some("x"));
    }

    #[test]
    fn test_word_limit() {
        let value = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(words_needed(&value), 5);
        assert!(TapeBuilder::with_word_limit(5).build(&value).is_ok());
        assert_eq!(
            TapeBuilder::with_word_limit(4).build(&value).unwrap_err(),
            CapacityError { needed: 5, limit: 4 }
        );
    }

    #[test]
    fn test_deep_nesting_builds_without_recursion() {
        let mut value = Value::Integer(7);
        for _ in 0..100_000 {
            value = Value::Array(vec![value]);
        }
        let doc = TapeBuilder::new().build(&value).unwrap();
        assert_eq!(doc.words().len(), words_needed(&value));
        assert!(doc.validate().is_ok());

        let mut node = doc.root();
        let mut depth = 0;
        while let Some(array) = node.as_array() {
            node = array.at(0).unwrap();
            depth += 1;
        }
        assert_eq!(depth, 100_000);
        assert_eq!(node.as_i32(), Some(7));

        // Value's own drop glue recurses; unwind it a level at a time.
        let mut rest = vec![value];
        while let Some(mut value) = rest.pop() {
            if let Value::Array(items) = &mut value {
                rest.append(items);
            }
        }
    }

    #[test]
    fn test_words_needed_matches_output() {
        let mut inner = BTreeMap::new();
        inner.insert("k".to_owned(), Value::Double(2.0));
        inner.insert("s".to_owned(), Value::from("str"));
        let value = Value::Array(vec![
            Value::Object(inner),
            Value::Null,
            Value::Array(vec![]),
            Value::Integer(-3),
        ]);
        let doc = TapeBuilder::new().build(&value).unwrap();
        assert_eq!(doc.words().len(), words_needed(&value));
        assert_eq!(doc.text().len(), text_needed(&value));
        assert_eq!(doc.materialize(), value);
    }
}
