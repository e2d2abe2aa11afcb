//! Observability hook for check progress.
//!
//! Checks never change outcome based on reporting; a reporter only sees
//! what happened.

use std::collections::BTreeSet;

use crate::source_usage::SearchScope;

/// A step taken by one of the checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckEvent<'a> {
    SourceSearchStarted {
        source: &'a str,
        scope: SearchScope,
        external_ids: &'a [String],
        match_all: bool,
    },
    CandidatesFound {
        source: &'a str,
        citations: usize,
        chunks: usize,
    },
    ExternalIdsFound {
        source: &'a str,
        found: &'a BTreeSet<&'a str>,
    },
    SourceUsagePassed {
        source: &'a str,
    },
    InstancesValidated {
        count: usize,
    },
    /// `actual` is `None` when the connector was not in the list.
    ConnectorChecked {
        connector_id: &'a str,
        expected: i64,
        actual: Option<i64>,
    },
}

impl CheckEvent<'_> {
    /// Stable snake_case name of the event.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SourceSearchStarted { .. } => "source_search_started",
            Self::CandidatesFound { .. } => "candidates_found",
            Self::ExternalIdsFound { .. } => "external_ids_found",
            Self::SourceUsagePassed { .. } => "source_usage_passed",
            Self::InstancesValidated { .. } => "instances_validated",
            Self::ConnectorChecked { .. } => "connector_checked",
        }
    }
}

/// Receives check events.
pub trait Reporter {
    fn report(&self, event: &CheckEvent<'_>);
}

/// Emits each event as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: &CheckEvent<'_>) {
        match event {
            CheckEvent::SourceSearchStarted {
                source,
                scope,
                external_ids,
                match_all,
            } => tracing::info!(
                source,
                %scope,
                ?external_ids,
                match_all,
                "checking source usage"
            ),
            CheckEvent::CandidatesFound {
                source,
                citations,
                chunks,
            } => tracing::debug!(source, citations, chunks, "source candidates found"),
            CheckEvent::ExternalIdsFound { source, found } => {
                tracing::debug!(source, ?found, "external ids found in response");
            }
            CheckEvent::SourceUsagePassed { source } => {
                tracing::info!(source, "source usage check passed");
            }
            CheckEvent::InstancesValidated { count } => {
                tracing::info!(count, "instances match expected schema");
            }
            CheckEvent::ConnectorChecked {
                connector_id,
                expected,
                actual: Some(actual),
            } if expected == actual => {
                tracing::info!(connector_id, expected, actual, "connector count matches");
            }
            CheckEvent::ConnectorChecked {
                connector_id,
                expected,
                actual,
            } => tracing::warn!(connector_id, expected, ?actual, "connector count mismatch"),
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&self, _event: &CheckEvent<'_>) {}
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingReporter;
    use super::*;

    #[test]
    fn event_names_are_stable() {
        let event = CheckEvent::ConnectorChecked {
            connector_id: "gmail",
            expected: 1,
            actual: None,
        };
        assert_eq!(event.name(), "connector_checked");
    }

    #[test]
    fn recording_reporter_keeps_order() {
        let reporter = RecordingReporter::default();
        reporter.report(&CheckEvent::InstancesValidated { count: 2 });
        reporter.report(&CheckEvent::SourceUsagePassed { source: "gmail" });
        assert_eq!(
            *reporter.names.borrow(),
            vec!["instances_validated", "source_usage_passed"]
        );
    }

    #[test]
    fn tracing_reporter_accepts_every_event() {
        let found = BTreeSet::from(["a"]);
        let ids = vec!["a".to_string()];
        let events = [
            CheckEvent::SourceSearchStarted {
                source: "gmail",
                scope: SearchScope::Both,
                external_ids: &ids,
                match_all: false,
            },
            CheckEvent::CandidatesFound {
                source: "gmail",
                citations: 1,
                chunks: 0,
            },
            CheckEvent::ExternalIdsFound {
                source: "gmail",
                found: &found,
            },
            CheckEvent::SourceUsagePassed { source: "gmail" },
            CheckEvent::InstancesValidated { count: 1 },
            CheckEvent::ConnectorChecked {
                connector_id: "gmail",
                expected: 1,
                actual: Some(1),
            },
        ];
        for event in &events {
            TracingReporter.report(event);
        }
    }
}
