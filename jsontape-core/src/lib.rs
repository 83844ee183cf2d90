//! jsontape core
//!
//! Read-only access to JSON documents stored as a packed tape of tagged
//! words, with lazy zero-copy views and an owned materialized form.
//!
//! # Architecture
//!
//! - **tag.rs** - Tagged word codec, the tag numbering shared by producer and decoder
//! - **number.rs** - Integer and double payload codecs
//! - **span.rs** - Text ranges that strings and keys point at
//! - **tape.rs** - Word and text buffers with checked reads
//! - **node.rs**, **array.rs**, **object.rs** - Borrowed lazy views
//! - **value.rs** - Owned values and materialization
//! - **document.rs** - Buffer ownership and the root view
//! - **validate.rs** - Whole-tape structural check
//! - **builder.rs** - Encoder from owned values
//! - **parse.rs** - JSON text entry point
//!
//! # Example
//!
//! ```
//! use jsontape_core::{parse, AllocationStrategy, Value};
//!
//! let doc = parse(AllocationStrategy::Dynamic, b"[10, \"Hello\"]").unwrap();
//! let root = doc.root().as_array().unwrap();
//! assert_eq!(root.at(0).unwrap().as_i32(), Some(10));
//! assert_eq!(root.at(1).unwrap().as_str(), Some("Hello"));
//! assert!(root.at(2).is_err());
//!
//! assert_eq!(
//!     doc.materialize(),
//!     Value::Array(vec![Value::Integer(10), Value::from("Hello")]),
//! );
//! ```

pub mod array;
pub mod builder;
pub mod document;
pub mod error;
pub mod node;
pub mod number;
pub mod object;
#[cfg(feature = "serde")]
pub mod parse;
pub mod span;
pub mod tag;
mod tape;
mod validate;
pub mod value;

pub use array::{ArrayIter, ArrayView};
pub use builder::TapeBuilder;
pub use document::Document;
pub use error::{CapacityError, IndexError, LayoutError, ParseError};
pub use node::{NodeView, ShallowValue};
pub use object::{Entries, ObjectView};
#[cfg(feature = "serde")]
pub use parse::{parse, parse_str, AllocationStrategy};
pub use span::Span;
pub use tag::{Tag, TaggedWord, Word};
pub use value::Value;
