//! Response normalizer for loosely-typed instance fields.
//!
//! The instances endpoint is known to send its counters as numeric strings
//! and `enabled` as `0`/`1` or `"true"`. These functions coerce those
//! encodings into strict JSON types and reject everything else with a
//! [`ShapeError`], so malformed data still fails validation.

use serde_json::{Map, Value};

use crate::errors::ShapeError;

/// Instance fields that hold integers on the wire.
pub const INTEGER_FIELDS: [&str; 3] = ["id", "totalItemsProcessed", "entityResolutionCompleted"];

/// Instance fields that hold booleans on the wire.
pub const BOOLEAN_FIELDS: [&str; 1] = ["enabled"];

/// Coerce an integer or a base-10 integer string into an `i64`.
///
/// # Errors
///
/// Returns [`ShapeError`] for floats, booleans, null, and strings that do
/// not parse as an integer after trimming.
pub fn coerce_integer(value: &Value, field: &str) -> Result<i64, ShapeError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| ShapeError::mismatch(None, field, "integer", value)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ShapeError::new(None, field, "integer", format!("string {s:?}"))),
        _ => Err(ShapeError::mismatch(None, field, "integer", value)),
    }
}

/// Coerce a boolean, `0`/`1`, or a `"true"`/`"false"`/`"1"`/`"0"` string.
///
/// # Errors
///
/// Returns [`ShapeError`] for any other value.
pub fn coerce_bool(value: &Value, field: &str) -> Result<bool, ShapeError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(ShapeError::new(None, field, "boolean", format!("number {n}"))),
        },
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
                Ok(true)
            } else if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
                Ok(false)
            } else {
                Err(ShapeError::new(None, field, "boolean", format!("string {s:?}")))
            }
        }
        _ => Err(ShapeError::mismatch(None, field, "boolean", value)),
    }
}

/// Return a copy of the instance list with the loosely-typed fields coerced.
///
/// Only [`INTEGER_FIELDS`] and [`BOOLEAN_FIELDS`] are touched, and only
/// when present; a missing field is left for the schema validator to report.
///
/// # Errors
///
/// Returns [`ShapeError`] if `raw` is not an array, a record is not an
/// object, or a present field cannot be coerced.
pub fn normalize_instances(raw: &Value) -> Result<Value, ShapeError> {
    let records = raw
        .as_array()
        .ok_or_else(|| ShapeError::mismatch(None, "<root>", "array", raw))?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_record(record).map_err(|e| e.at(index)))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

fn normalize_record(record: &Value) -> Result<Value, ShapeError> {
    let object = record
        .as_object()
        .ok_or_else(|| ShapeError::mismatch(None, "<record>", "object", record))?;

    let mut normalized = Map::with_capacity(object.len());
    for (key, value) in object {
        let coerced = if INTEGER_FIELDS.contains(&key.as_str()) {
            Value::from(coerce_integer(value, key)?)
        } else if BOOLEAN_FIELDS.contains(&key.as_str()) {
            Value::Bool(coerce_bool(value, key)?)
        } else {
            value.clone()
        };
        normalized.insert(key.clone(), coerced);
    }
    Ok(Value::Object(normalized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn integer_accepts_numbers_and_numeric_strings() {
        assert_eq!(coerce_integer(&json!(361), "id").unwrap(), 361);
        assert_eq!(coerce_integer(&json!("361"), "id").unwrap(), 361);
        assert_eq!(coerce_integer(&json!(" -4 "), "id").unwrap(), -4);
    }

    #[test]
    fn integer_rejects_lossy_inputs() {
        for bad in [json!(1.5), json!(""), json!("12abc"), json!(null), json!(true)] {
            let err = coerce_integer(&bad, "totalItemsProcessed").unwrap_err();
            assert_eq!(err.field, "totalItemsProcessed");
            assert_eq!(err.expected, "integer");
        }
    }

    #[test]
    fn bool_accepts_boolean_like_values() {
        assert!(coerce_bool(&json!(true), "enabled").unwrap());
        assert!(coerce_bool(&json!(1), "enabled").unwrap());
        assert!(coerce_bool(&json!("TRUE"), "enabled").unwrap());
        assert!(!coerce_bool(&json!("0"), "enabled").unwrap());
        assert!(!coerce_bool(&json!(0), "enabled").unwrap());
    }

    #[test]
    fn bool_rejects_other_values() {
        for bad in [json!(2), json!("yes"), json!(null), json!([])] {
            assert!(coerce_bool(&bad, "enabled").is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn normalize_coerces_only_known_fields() {
        let raw = json!([{
            "id": "7",
            "enabled": "true",
            "totalItemsProcessed": "361",
            "entityResolutionCompleted": 2,
            "tenantId": 42,
            "extra": "kept"
        }]);
        let normalized = normalize_instances(&raw).unwrap();
        assert_eq!(
            normalized,
            json!([{
                "id": 7,
                "enabled": true,
                "totalItemsProcessed": 361,
                "entityResolutionCompleted": 2,
                "tenantId": 42,
                "extra": "kept"
            }])
        );
    }

    #[test]
    fn normalize_leaves_missing_fields_missing() {
        let normalized = normalize_instances(&json!([{ "tenantId": "t" }])).unwrap();
        assert_eq!(normalized, json!([{ "tenantId": "t" }]));
    }

    #[test]
    fn normalize_reports_record_index() {
        let raw = json!([{ "id": 1 }, { "id": "one" }]);
        let err = normalize_instances(&raw).unwrap_err();
        assert_eq!(err.index, Some(1));
        assert_eq!(err.field, "id");
    }

    #[test]
    fn normalize_rejects_non_array() {
        let err = normalize_instances(&json!({ "id": 1 })).unwrap_err();
        assert_eq!(err.index, None);
        assert_eq!(err.expected, "array");
        assert_eq!(err.found, "object");
    }
}
