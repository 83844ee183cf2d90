//! JSON text entry point.
//!
//! Syntax checking is done by `serde_json`; the accepted value is then laid
//! out by [`TapeBuilder`]. On top of JSON syntax the document root must be
//! an array or an object.
//!
//! There is no nesting limit. `serde_json`'s recursion limit is switched off
//! and `serde_stacker` grows the stack on demand while deserializing.

use serde::Deserialize;
use tracing::debug;

use crate::builder::TapeBuilder;
use crate::document::Document;
use crate::error::ParseError;
use crate::value::Value;

/// How the word buffer of a parsed document is allocated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AllocationStrategy {
    /// Reserve the word buffer once, at `input.len()` words, and refuse a
    /// document whose tape would not fit. Valid JSON text never needs more
    /// words than it has bytes. The bound covers the finished tape only;
    /// the intermediate parse tree is allocated as it grows.
    Single,
    /// Allocate exactly what the document needs.
    #[default]
    Dynamic,
}

/// Parse JSON text into a [`Document`].
pub fn parse(strategy: AllocationStrategy, input: &[u8]) -> Result<Document, ParseError> {
    let result = parse_document(strategy, input);
    match &result {
        Ok(doc) => debug!(
            ?strategy,
            input_bytes = input.len(),
            words = doc.words().len(),
            "parsed document"
        ),
        Err(err) => debug!(
            ?strategy,
            line = err.line,
            column = err.column,
            message = %err.message,
            "parse failed"
        ),
    }
    result
}

/// [`parse`] for text already known to be UTF-8.
pub fn parse_str(strategy: AllocationStrategy, input: &str) -> Result<Document, ParseError> {
    parse(strategy, input.as_bytes())
}

fn parse_document(strategy: AllocationStrategy, input: &[u8]) -> Result<Document, ParseError> {
    check_root(input)?;

    let mut de = serde_json::Deserializer::from_slice(input);
    de.disable_recursion_limit();
    let json = serde_json::Value::deserialize(serde_stacker::Deserializer::new(&mut de))
        .map_err(syntax_error)?;
    de.end().map_err(syntax_error)?;
    let value = Value::from_json(&json);

    let builder = match strategy {
        AllocationStrategy::Single => TapeBuilder::with_word_limit(input.len()),
        AllocationStrategy::Dynamic => TapeBuilder::new(),
    };
    builder
        .build(&value)
        .map_err(|err| ParseError::new(0, 0, err.to_string()))
}

/// The first non-whitespace byte must open an array or an object.
fn check_root(input: &[u8]) -> Result<(), ParseError> {
    let start = input
        .iter()
        .position(|b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r'));
    match start {
        None => {
            let (line, column) = line_column(input, input.len());
            Err(ParseError::new(line, column, "no root element"))
        }
        Some(offset) if matches!(input[offset], b'[' | b'{') => Ok(()),
        Some(offset) => {
            let (line, column) = line_column(input, offset);
            Err(ParseError::new(line, column, "document root must be object or array"))
        }
    }
}

/// 1-based line and column of byte `offset`.
fn line_column(input: &[u8], offset: usize) -> (usize, usize) {
    let before = &input[..offset];
    let line = 1 + before.iter().filter(|&&b| b == b'\n').count();
    let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    (line, offset - line_start + 1)
}

/// serde_json appends the position to its message; keep them apart.
fn syntax_error(err: serde_json::Error) -> ParseError {
    let (line, column) = (err.line(), err.column());
    let full = err.to_string();
    let suffix = format!(" at line {line} column {column}");
    let message = full.strip_suffix(&suffix).unwrap_or(&full).to_owned();
    ParseError::new(line, column, message)
}
