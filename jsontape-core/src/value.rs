//! Owned JSON values.
//!
//! [`Value`] is the materialized form of a node: a plain tree with no tie
//! to the document it came from. Materializing walks the views recursively,
//! so the recursion depth equals the nesting depth of the JSON itself.

use std::collections::BTreeMap;

use crate::node::{NodeView, ShallowValue};
use crate::tag::Tag;

/// A fully owned JSON value.
///
/// Objects are kept in a `BTreeMap`, whose iteration order is the same
/// ascending key-byte order the packed buffer stores entries in.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i32),
    Double(f64),
    Null,
    Bool(bool),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Kind of this value, using the buffer's tag numbering.
    pub fn kind(&self) -> Tag {
        match self {
            Value::Integer(_) => Tag::Integer,
            Value::Double(_) => Tag::Double,
            Value::Null => Tag::Null,
            Value::Bool(false) => Tag::False,
            Value::Bool(true) => Tag::True,
            Value::String(_) => Tag::String,
            Value::Array(_) => Tag::Array,
            Value::Object(_) => Tag::Object,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Either numeric kind as a double.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(f64::from(*i)),
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Member `key` of an object value.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(key)
    }
}

// ============================================================================
// Materialization
// ============================================================================

impl<'a> From<NodeView<'a>> for Value {
    fn from(node: NodeView<'a>) -> Self {
        Value::from(node.shallow())
    }
}

impl<'a> From<ShallowValue<'a>> for Value {
    fn from(shallow: ShallowValue<'a>) -> Self {
        match shallow {
            ShallowValue::Integer(i) => Value::Integer(i),
            ShallowValue::Double(d) => Value::Double(d),
            ShallowValue::Null => Value::Null,
            ShallowValue::Bool(b) => Value::Bool(b),
            ShallowValue::String(s) => Value::String(s.to_owned()),
            ShallowValue::Array(array) => Value::Array(array.to_vec()),
            ShallowValue::Object(object) => Value::Object(object.to_map()),
        }
    }
}

// ============================================================================
// Construction helpers
// ============================================================================

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ============================================================================
// serde interop
// ============================================================================

#[cfg(feature = "serde")]
impl Value {
    /// Convert a `serde_json` value.
    ///
    /// A number written without `.`, `e` or `E` that fits in `i32` becomes
    /// [`Value::Integer`], so `-0` is the integer 0. Every other number
    /// becomes [`Value::Double`], with exponents past the `f64` range
    /// rounding to infinity or zero.
    ///
    /// The walk keeps its own stack, so nesting depth is bounded by memory
    /// rather than by the call stack.
    pub fn from_json(json: &serde_json::Value) -> Value {
        let mut stack = Vec::new();
        let mut finished = JsonFrame::open(json, &mut stack);
        while let Some(top) = stack.last_mut() {
            if let Some(value) = finished.take() {
                top.push(value);
            }
            finished = match top.next_child() {
                Some(child) => JsonFrame::open(child, &mut stack),
                None => stack.pop().map(JsonFrame::finish),
            };
        }
        finished.unwrap_or(Value::Null)
    }
}

/// A `serde_json` container being converted.
#[cfg(feature = "serde")]
enum JsonFrame<'j> {
    Array(Vec<Value>, std::slice::Iter<'j, serde_json::Value>),
    Object(
        BTreeMap<String, Value>,
        serde_json::map::Iter<'j>,
        Option<&'j String>,
    ),
}

#[cfg(feature = "serde")]
impl<'j> JsonFrame<'j> {
    /// Push a frame for a container, or convert a scalar right away.
    fn open(json: &'j serde_json::Value, stack: &mut Vec<JsonFrame<'j>>) -> Option<Value> {
        let scalar = match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => number_value(n),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => {
                stack.push(JsonFrame::Array(Vec::with_capacity(items.len()), items.iter()));
                return None;
            }
            serde_json::Value::Object(map) => {
                stack.push(JsonFrame::Object(BTreeMap::new(), map.iter(), None));
                return None;
            }
        };
        Some(scalar)
    }

    fn next_child(&mut self) -> Option<&'j serde_json::Value> {
        match self {
            JsonFrame::Array(_, rest) => rest.next(),
            JsonFrame::Object(_, rest, key) => {
                let (name, value) = rest.next()?;
                *key = Some(name);
                Some(value)
            }
        }
    }

    fn push(&mut self, value: Value) {
        match self {
            JsonFrame::Array(items, _) => items.push(value),
            JsonFrame::Object(members, _, key) => {
                if let Some(name) = key.take() {
                    members.insert(name.clone(), value);
                }
            }
        }
    }

    fn finish(self) -> Value {
        match self {
            JsonFrame::Array(items, _) => Value::Array(items),
            JsonFrame::Object(members, _, _) => Value::Object(members),
        }
    }
}

/// Type a number from its source text.
#[cfg(feature = "serde")]
fn number_value(n: &serde_json::Number) -> Value {
    let lexeme = n.to_string();
    let integral = !lexeme.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'));
    if integral {
        if let Ok(i) = lexeme.parse::<i32>() {
            return Value::Integer(i);
        }
    }
    Value::Double(lexeme.parse::<f64>().unwrap_or(f64::NAN))
}

#[cfg(feature = "serde")]
impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        Value::from_json(json)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Value::Integer(i) => serializer.serialize_i32(*i),
            Value::Double(d) => serializer.serialize_f64(*d),
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}
