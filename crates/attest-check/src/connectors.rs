//! Processed-item count checks per connector.

use attest_core::AdminInstance;

use crate::error::CheckError;
use crate::reporter::{CheckEvent, Reporter, TracingReporter};

/// Check one connector's `totalItemsProcessed`, reporting through
/// [`TracingReporter`].
///
/// # Errors
///
/// See [`check_connector_items_with`].
pub fn check_connector_items(
    instances: &[AdminInstance],
    connector_id: &str,
    expected: i64,
) -> Result<(), CheckError> {
    check_connector_items_with(instances, connector_id, expected, &TracingReporter)
}

/// Check that the first instance for `connector_id` processed `expected` items.
///
/// # Errors
///
/// Returns [`CheckError::ConnectorNotFound`] if no instance has that
/// connector id, or [`CheckError::CountMismatch`] if the count differs.
pub fn check_connector_items_with(
    instances: &[AdminInstance],
    connector_id: &str,
    expected: i64,
    reporter: &dyn Reporter,
) -> Result<(), CheckError> {
    let found = instances
        .iter()
        .find(|instance| instance.connector_id == connector_id);

    reporter.report(&CheckEvent::ConnectorChecked {
        connector_id,
        expected,
        actual: found.map(|instance| instance.total_items_processed),
    });

    let Some(instance) = found else {
        return Err(CheckError::ConnectorNotFound {
            connector_id: connector_id.to_string(),
        });
    };

    if instance.total_items_processed == expected {
        Ok(())
    } else {
        Err(CheckError::CountMismatch {
            connector_id: connector_id.to_string(),
            expected,
            actual: instance.total_items_processed,
        })
    }
}

/// Check several connectors, reporting through [`TracingReporter`].
///
/// # Errors
///
/// See [`check_connector_counts_with`].
pub fn check_connector_counts<'a, I>(
    instances: &[AdminInstance],
    expectations: I,
) -> Result<(), CheckError>
where
    I: IntoIterator<Item = (&'a str, i64)>,
{
    check_connector_counts_with(instances, expectations, &TracingReporter)
}

/// Check every `(connector_id, expected)` pair without stopping at the
/// first failure.
///
/// # Errors
///
/// A single failure is returned as-is. Two or more are wrapped in
/// [`CheckError::Aggregate`] in expectation order.
pub fn check_connector_counts_with<'a, I>(
    instances: &[AdminInstance],
    expectations: I,
    reporter: &dyn Reporter,
) -> Result<(), CheckError>
where
    I: IntoIterator<Item = (&'a str, i64)>,
{
    let mut failures: Vec<CheckError> = expectations
        .into_iter()
        .filter_map(|(connector_id, expected)| {
            check_connector_items_with(instances, connector_id, expected, reporter).err()
        })
        .collect();

    match failures.len() {
        0 => Ok(()),
        1 => Err(failures.remove(0)),
        _ => Err(CheckError::Aggregate(failures)),
    }
}
