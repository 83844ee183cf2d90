//! Full structural check of a tape.
//!
//! The views only check what they touch. [`validate`] walks every node
//! reachable from the root once, with an explicit stack so that nesting
//! depth never turns into call depth, and reports the first violation.

use std::cmp::Ordering;

use tracing::debug;

use crate::error::LayoutError;
use crate::tag::Tag;
use crate::tape::{Tape, ENTRY_WORDS};

pub(crate) fn validate(tape: &Tape, root_tag: Tag, root_position: usize) -> Result<(), LayoutError> {
    let result = walk(tape, root_tag, root_position);
    if let Err(err) = &result {
        debug!(%err, words = tape.words().len(), "document failed validation");
    }
    result
}

fn walk(tape: &Tape, root_tag: Tag, root_position: usize) -> Result<(), LayoutError> {
    let mut pending = vec![(root_tag, root_position)];

    while let Some((tag, position)) = pending.pop() {
        tape.check_payload(tag, position)?;
        match tag {
            Tag::Integer | Tag::Double | Tag::Null | Tag::False | Tag::True => {}
            Tag::String => {
                tape.str(tape.span(position)?)?;
            }
            Tag::Array => {
                let len = tape.container_len(position, 1)?;
                for index in 0..len {
                    pending.push(tape.slot(position + 1 + index)?);
                }
            }
            Tag::Object => {
                let len = tape.container_len(position, ENTRY_WORDS)?;
                let mut previous: Option<&[u8]> = None;
                for index in 0..len {
                    let entry = position + 1 + index * ENTRY_WORDS;
                    let key = tape.str(tape.span(entry)?)?.as_bytes();
                    if let Some(previous) = previous {
                        match previous.cmp(key) {
                            Ordering::Less => {}
                            Ordering::Equal => {
                                return Err(LayoutError::DuplicateKey { object: position, index })
                            }
                            Ordering::Greater => {
                                return Err(LayoutError::UnsortedKeys { object: position, index })
                            }
                        }
                    }
                    previous = Some(key);
                    pending.push(tape.slot(entry + 2)?);
                }
            }
        }
    }
    Ok(())
}
