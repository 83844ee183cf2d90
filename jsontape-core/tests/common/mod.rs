//! Shared helpers for the integration tests.
//!
//! Random document generation plus a few assertion helpers.

#![allow(dead_code)]

mod generators;

pub use generators::Gen;

use jsontape_core::{Document, Value};

/// Deeply nested single-element arrays around `leaf`.
pub fn nested_arrays(depth: usize, leaf: Value) -> Value {
    (0..depth).fold(leaf, |inner, _| Value::Array(vec![inner]))
}

/// Deeply nested single-member objects around `leaf`.
pub fn nested_objects(depth: usize, key: &str, leaf: Value) -> Value {
    (0..depth).fold(leaf, |inner, _| [(key, inner)].into_iter().collect())
}

/// Compare two values, treating doubles as equal when their bits match.
pub fn bit_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Double(x), Value::Double(y)) => x.to_bits() == y.to_bits(),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| bit_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys)
                    .all(|((kx, x), (ky, y))| kx == ky && bit_equal(x, y))
        }
        _ => a == b,
    }
}

/// Build a document and check that it passes validation.
pub fn build(value: &Value) -> Document {
    let doc = Document::from_value(value);
    assert_eq!(doc.validate(), Ok(()));
    doc
}
