//! Check failure taxonomy.

use attest_core::ShapeError;
use thiserror::Error;

use crate::source_usage::SearchScope;

/// Why a check did not pass. Every variant is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// Input data was malformed.
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),

    /// The check itself was asked for something meaningless.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// No in-scope item carries the requested source.
    #[error("expected at least one item with source \"{data_source}\" in scope \"{scope}\", but found none")]
    NoMatch { data_source: String, scope: SearchScope },

    /// The source is present but none of the requested ids are.
    #[error(
        "expected at least one of externalIds={external_ids:?} in source \"{data_source}\" items (scope \"{scope}\"), but none were found"
    )]
    NoIdentifierMatch {
        data_source: String,
        scope: SearchScope,
        external_ids: Vec<String>,
    },

    /// All ids were required and this one is absent.
    #[error(
        "expected externalId \"{external_id}\" in source \"{data_source}\" items (scope \"{scope}\"), but it was not found"
    )]
    MissingIdentifier {
        data_source: String,
        scope: SearchScope,
        external_id: String,
    },

    #[error("connector \"{connector_id}\" not found in response")]
    ConnectorNotFound { connector_id: String },

    #[error("mismatch for connector \"{connector_id}\": expected {expected}, got {actual}")]
    CountMismatch {
        connector_id: String,
        expected: i64,
        actual: i64,
    },

    /// Several independent checks failed in one batch.
    #[error("{} checks failed: {}", .0.len(), join_messages(.0))]
    Aggregate(Vec<CheckError>),
}

impl CheckError {
    /// The individual failures, flattening an aggregate.
    pub fn failures(&self) -> Vec<&Self> {
        match self {
            Self::Aggregate(errors) => errors.iter().flat_map(Self::failures).collect(),
            other => vec![other],
        }
    }
}

fn join_messages(errors: &[CheckError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_joins_messages() {
        let err = CheckError::Aggregate(vec![
            CheckError::ConnectorNotFound {
                connector_id: "slack".into(),
            },
            CheckError::CountMismatch {
                connector_id: "gmail".into(),
                expected: 360,
                actual: 361,
            },
        ]);
        assert_eq!(
            err.to_string(),
            "2 checks failed: connector \"slack\" not found in response; \
             mismatch for connector \"gmail\": expected 360, got 361"
        );
        assert_eq!(err.failures().len(), 2);
    }

    #[test]
    fn single_failure_is_its_own_list() {
        let err = CheckError::InvalidQuery("source must not be empty".into());
        assert_eq!(err.failures(), vec![&err]);
    }

    #[test]
    fn no_match_names_source_and_scope() {
        let err = CheckError::NoMatch {
            data_source: "gmail".into(),
            scope: SearchScope::Citations,
        };
        assert!(err.to_string().contains("\"gmail\""));
        assert!(err.to_string().contains("\"citations\""));
    }
}
