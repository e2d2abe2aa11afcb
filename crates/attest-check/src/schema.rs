//! Shape validation for `/admin/instances` bodies.

use attest_core::normalize::normalize_instances;
use attest_core::{AdminInstance, ShapeError};
use serde_json::{Map, Value};

use crate::error::CheckError;
use crate::reporter::{CheckEvent, Reporter, TracingReporter};

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Integer,
    Text,
    Boolean,
    /// Absent, null, or text.
    OptionalText,
}

impl FieldKind {
    const fn expected(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Text => "string",
            Self::Boolean => "boolean",
            Self::OptionalText => "null or string",
        }
    }
}

/// Every instance field in wire order. Validation reports the first
/// offending field in this order.
const INSTANCE_FIELDS: [(&str, FieldKind); 14] = [
    ("id", FieldKind::Integer),
    ("tenantId", FieldKind::Text),
    ("connectorId", FieldKind::Text),
    ("displayName", FieldKind::Text),
    ("enabled", FieldKind::Boolean),
    ("settingsJson", FieldKind::Text),
    ("status", FieldKind::Text),
    ("error", FieldKind::OptionalText),
    ("createdUtc", FieldKind::Text),
    ("updatedUtc", FieldKind::Text),
    ("totalItemsProcessed", FieldKind::Integer),
    ("lastSyncUtc", FieldKind::OptionalText),
    ("syncPhase", FieldKind::OptionalText),
    ("entityResolutionCompleted", FieldKind::Integer),
];

/// Check that `raw` is a list of well-formed instance records.
///
/// Nothing is coerced: a numeric string in `id` is an error here. Run
/// [`normalize_instances`] first to accept the loose encodings. Extra
/// fields are ignored.
///
/// # Errors
///
/// Returns [`ShapeError`] naming the record index and field of the first
/// problem found.
pub fn validate_instances(raw: &Value) -> Result<&[Value], ShapeError> {
    let records = raw
        .as_array()
        .ok_or_else(|| ShapeError::mismatch(None, "<root>", "array", raw))?;

    for (index, record) in records.iter().enumerate() {
        let object = record
            .as_object()
            .ok_or_else(|| ShapeError::mismatch(Some(index), "<record>", "object", record))?;
        validate_record(index, object)?;
    }

    Ok(records)
}

fn validate_record(index: usize, record: &Map<String, Value>) -> Result<(), ShapeError> {
    for (field, kind) in INSTANCE_FIELDS {
        match (kind, record.get(field)) {
            (FieldKind::OptionalText, None | Some(Value::Null | Value::String(_)))
            | (FieldKind::Text, Some(Value::String(_)))
            | (FieldKind::Boolean, Some(Value::Bool(_))) => {}
            (FieldKind::Integer, Some(Value::Number(n))) if n.is_i64() => {}
            (_, None) => return Err(ShapeError::missing(Some(index), field, kind.expected())),
            (_, Some(value)) => {
                return Err(ShapeError::mismatch(Some(index), field, kind.expected(), value));
            }
        }
    }
    Ok(())
}

/// Validate `raw` and deserialize it into typed records.
///
/// # Errors
///
/// Returns [`ShapeError`] if validation fails.
pub fn parse_instances(raw: &Value) -> Result<Vec<AdminInstance>, ShapeError> {
    let records = validate_instances(raw)?;
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value(record.clone())
                .map_err(|e| ShapeError::new(Some(index), "<record>", "admin instance", e.to_string()))
        })
        .collect()
}

/// Normalize, validate, and parse an instances body, reporting through
/// [`TracingReporter`].
///
/// # Errors
///
/// See [`prepare_instances_with`].
pub fn prepare_instances(raw: &Value) -> Result<Vec<AdminInstance>, CheckError> {
    prepare_instances_with(raw, &TracingReporter)
}

/// Normalize, validate, and parse an instances body.
///
/// # Errors
///
/// Returns [`CheckError::Shape`] if a loose field cannot be coerced or the
/// normalized body fails validation.
pub fn prepare_instances_with(
    raw: &Value,
    reporter: &dyn Reporter,
) -> Result<Vec<AdminInstance>, CheckError> {
    let normalized = normalize_instances(raw)?;
    let instances = parse_instances(&normalized)?;
    reporter.report(&CheckEvent::InstancesValidated {
        count: instances.len(),
    });
    Ok(instances)
}
