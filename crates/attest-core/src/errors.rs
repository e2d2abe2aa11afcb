//! Shape error shared by the normalizer, the parsers, and the schema validator.
//!
//! Check-level failures (missing source, count mismatch, ...) live in
//! `attest-check`. Transport failures live in `attest-client`.

use serde_json::Value;
use thiserror::Error;

/// A JSON value did not have the expected shape.
///
/// `index` is the position of the offending record when the value came from
/// a list, `None` for top-level or single-object shapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}field '{field}' expected {expected}, found {found}", record_prefix(.index))]
pub struct ShapeError {
    pub index: Option<usize>,
    pub field: String,
    pub expected: &'static str,
    pub found: String,
}

impl ShapeError {
    pub fn new(
        index: Option<usize>,
        field: impl Into<String>,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        Self {
            index,
            field: field.into(),
            expected,
            found: found.into(),
        }
    }

    /// The value exists but has the wrong JSON kind.
    pub fn mismatch(
        index: Option<usize>,
        field: impl Into<String>,
        expected: &'static str,
        value: &Value,
    ) -> Self {
        Self::new(index, field, expected, json_kind(value))
    }

    /// The field is required but absent.
    pub fn missing(index: Option<usize>, field: impl Into<String>, expected: &'static str) -> Self {
        Self::new(index, field, expected, "nothing")
    }

    /// Attach a record index to an error raised without one.
    #[must_use]
    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

#[allow(clippy::ref_option)]
fn record_prefix(index: &Option<usize>) -> String {
    index.map_or_else(String::new, |i| format!("record {i}: "))
}

/// Name of the JSON kind of `value`, as used in shape error messages.
///
/// Integers and other numbers are told apart so that `1.5` is reported as
/// `number` when an `integer` was expected.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
