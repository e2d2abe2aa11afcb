//! Source-usage matching over chat citations and retrieval chunks.

use std::collections::BTreeSet;
use std::fmt;

use attest_core::ChatResponse;
use serde::{Deserialize, Serialize};

use crate::error::CheckError;
use crate::reporter::{CheckEvent, Reporter, TracingReporter};

/// Where to look for items from the requested source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    /// Only `citations`.
    Citations,
    /// Only `answerLog.retrieval.chunks`.
    Chunks,
    #[default]
    Both,
}

impl SearchScope {
    pub const fn includes_citations(self) -> bool {
        matches!(self, Self::Citations | Self::Both)
    }

    pub const fn includes_chunks(self) -> bool {
        matches!(self, Self::Chunks | Self::Both)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Citations => "citations",
            Self::Chunks => "chunks",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What [`match_source_usage`] should look for.
///
/// With no `external_ids`, only the presence of the source is checked.
/// With ids, `match_all` decides between "any of" and "every one of".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceQuery {
    pub source: String,
    #[serde(default)]
    pub external_ids: Vec<String>,
    #[serde(default)]
    pub match_all: bool,
    #[serde(default)]
    pub scope: SearchScope,
}

impl SourceQuery {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            external_ids: Vec::new(),
            match_all: false,
            scope: SearchScope::default(),
        }
    }

    #[must_use]
    pub fn with_external_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.external_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn match_all(mut self, match_all: bool) -> Self {
        self.match_all = match_all;
        self
    }

    #[must_use]
    pub const fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }
}

/// Summary of a passing source-usage check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceUsage {
    /// Citations carrying the source.
    pub citations: usize,
    /// Retrieval chunks carrying the source.
    pub chunks: usize,
    /// Distinct non-empty external ids among those items.
    pub external_ids: BTreeSet<String>,
}

/// Check that `response` shows use of `query.source`, reporting through
/// [`TracingReporter`].
///
/// # Errors
///
/// See [`match_source_usage_with`].
pub fn match_source_usage(
    response: &ChatResponse,
    query: &SourceQuery,
) -> Result<SourceUsage, CheckError> {
    match_source_usage_with(response, query, &TracingReporter)
}

/// Check that `response` shows use of `query.source`.
///
/// Candidates are in-scope citations and chunk data items whose `source`
/// equals the requested one exactly. Missing `citations`, `answerLog`,
/// `retrieval` or `chunks` count as empty.
///
/// # Errors
///
/// - [`CheckError::InvalidQuery`] if `query.source` is empty.
/// - [`CheckError::NoMatch`] if there are no candidates.
/// - [`CheckError::MissingIdentifier`] if `match_all` is set and a requested
///   id is absent; the first absent id in request order is named.
/// - [`CheckError::NoIdentifierMatch`] if `match_all` is unset and none of
///   the requested ids is present.
pub fn match_source_usage_with(
    response: &ChatResponse,
    query: &SourceQuery,
    reporter: &dyn Reporter,
) -> Result<SourceUsage, CheckError> {
    let source = query.source.as_str();
    if source.is_empty() {
        return Err(CheckError::InvalidQuery("source must not be empty".into()));
    }

    reporter.report(&CheckEvent::SourceSearchStarted {
        source,
        scope: query.scope,
        external_ids: &query.external_ids,
        match_all: query.match_all,
    });

    let citation_ids: Vec<Option<&str>> = if query.scope.includes_citations() {
        response
            .citations
            .iter()
            .filter(|citation| citation.source.as_deref() == Some(source))
            .map(|citation| citation.external_id.as_deref())
            .collect()
    } else {
        Vec::new()
    };

    let chunk_ids: Vec<Option<&str>> = if query.scope.includes_chunks() {
        response
            .retrieval_chunks()
            .iter()
            .filter(|chunk| chunk.data_item.source == source)
            .map(|chunk| Some(chunk.data_item.external_id.as_str()))
            .collect()
    } else {
        Vec::new()
    };

    reporter.report(&CheckEvent::CandidatesFound {
        source,
        citations: citation_ids.len(),
        chunks: chunk_ids.len(),
    });

    if citation_ids.is_empty() && chunk_ids.is_empty() {
        return Err(CheckError::NoMatch {
            data_source: source.to_string(),
            scope: query.scope,
        });
    }

    // Null and empty ids never count as found.
    let found: BTreeSet<&str> = citation_ids
        .iter()
        .chain(chunk_ids.iter())
        .flatten()
        .copied()
        .filter(|id| !id.is_empty())
        .collect();

    if !query.external_ids.is_empty() {
        reporter.report(&CheckEvent::ExternalIdsFound {
            source,
            found: &found,
        });

        if query.match_all {
            if let Some(missing) = query
                .external_ids
                .iter()
                .find(|id| !found.contains(id.as_str()))
            {
                return Err(CheckError::MissingIdentifier {
                    data_source: source.to_string(),
                    scope: query.scope,
                    external_id: missing.clone(),
                });
            }
        } else if !query
            .external_ids
            .iter()
            .any(|id| found.contains(id.as_str()))
        {
            return Err(CheckError::NoIdentifierMatch {
                data_source: source.to_string(),
                scope: query.scope,
                external_ids: query.external_ids.clone(),
            });
        }
    }

    reporter.report(&CheckEvent::SourceUsagePassed { source });

    Ok(SourceUsage {
        citations: citation_ids.len(),
        chunks: chunk_ids.len(),
        external_ids: found.into_iter().map(String::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::NoopReporter;
    use attest_core::{AnswerLog, Citation, DataItem, Retrieval, RetrievalChunk};
    use pretty_assertions::assert_eq;

    fn citation(source: Option<&str>, external_id: Option<&str>) -> Citation {
        Citation {
            source: source.map(String::from),
            external_id: external_id.map(String::from),
            ..Citation::default()
        }
    }

    fn chunk(source: &str, external_id: &str) -> RetrievalChunk {
        RetrievalChunk {
            chunk_id: format!("{source}-{external_id}"),
            score: 0.5,
            text_preview: String::new(),
            data_item: DataItem {
                source: source.into(),
                external_id: external_id.into(),
                graph_id: None,
                data_item_type: None,
                title_or_subject: None,
                created_at_utc: None,
            },
            entities: Vec::new(),
        }
    }

    fn response(citations: Vec<Citation>, chunks: Option<Vec<RetrievalChunk>>) -> ChatResponse {
        ChatResponse {
            answer: "answer".into(),
            session_id: 1,
            citations,
            user_message_id: None,
            assistant_message_id: None,
            created_at_utc: None,
            answer_log: chunks.map(|chunks| AnswerLog {
                original_query: "q".into(),
                rewritten_query: None,
                retrieval: Some(Retrieval {
                    total_chunks: None,
                    total_data_items: None,
                    chunks: Some(chunks),
                }),
            }),
        }
    }

    fn run(response: &ChatResponse, query: &SourceQuery) -> Result<SourceUsage, CheckError> {
        match_source_usage_with(response, query, &NoopReporter)
    }

    #[test]
    fn empty_source_is_rejected() {
        let body = response(vec![citation(Some(""), None)], None);
        let err = run(&body, &SourceQuery::new("")).unwrap_err();
        assert!(matches!(err, CheckError::InvalidQuery(_)));
    }

    #[test]
    fn counts_candidates_per_collection() {
        let body = response(
            vec![citation(Some("gmail"), Some("a")), citation(Some("slack"), Some("b"))],
            Some(vec![chunk("gmail", "a"), chunk("gmail", "c")]),
        );
        let usage = run(&body, &SourceQuery::new("gmail")).unwrap();
        assert_eq!(usage.citations, 1);
        assert_eq!(usage.chunks, 2);
        assert_eq!(
            usage.external_ids,
            BTreeSet::from(["a".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn chunks_scope_ignores_citations() {
        let body = response(vec![citation(Some("gmail"), Some("a"))], None);
        let err = run(&body, &SourceQuery::new("gmail").with_scope(SearchScope::Chunks))
            .unwrap_err();
        assert_eq!(
            err,
            CheckError::NoMatch {
                data_source: "gmail".into(),
                scope: SearchScope::Chunks,
            }
        );
    }

    #[test]
    fn source_matching_is_exact() {
        let body = response(vec![citation(Some("Gmail"), Some("a"))], Some(vec![chunk("gmail-2", "a")]));
        assert!(run(&body, &SourceQuery::new("gmail")).is_err());
    }

    #[test]
    fn null_external_ids_do_not_match() {
        let body = response(vec![citation(Some("gmail"), None), citation(Some("gmail"), Some(""))], None);

        let usage = run(&body, &SourceQuery::new("gmail")).unwrap();
        assert!(usage.external_ids.is_empty());

        let err = run(&body, &SourceQuery::new("gmail").with_external_ids([""])).unwrap_err();
        assert!(matches!(err, CheckError::NoIdentifierMatch { .. }));
    }

    #[test]
    fn any_match_passes_with_one_hit() {
        let body = response(Vec::new(), Some(vec![chunk("gmail", "19c8c0b2f79f6627")]));
        let query = SourceQuery::new("gmail")
            .with_external_ids(["19c8c0b2f79f6627", "abc123"])
            .with_scope(SearchScope::Chunks);
        assert!(run(&body, &query).is_ok());
    }

    #[test]
    fn match_all_names_first_missing_id() {
        let body = response(vec![citation(Some("slack"), Some("id-2"))], None);
        let query = SourceQuery::new("slack")
            .with_external_ids(["id-1", "id-2", "id-3"])
            .match_all(true)
            .with_scope(SearchScope::Citations);
        let err = run(&body, &query).unwrap_err();
        assert_eq!(
            err,
            CheckError::MissingIdentifier {
                data_source: "slack".into(),
                scope: SearchScope::Citations,
                external_id: "id-1".into(),
            }
        );
    }

    #[test]
    fn match_all_collects_ids_across_collections() {
        let body = response(
            vec![citation(Some("slack"), Some("id-1"))],
            Some(vec![chunk("slack", "id-2")]),
        );
        let query = SourceQuery::new("slack")
            .with_external_ids(["id-1", "id-2"])
            .match_all(true);
        assert!(run(&body, &query).is_ok());
    }

    #[test]
    fn scope_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SearchScope::Citations).unwrap(), "\"citations\"");
        let query: SourceQuery = serde_json::from_str(r#"{"source":"gmail"}"#).unwrap();
        assert_eq!(query, SourceQuery::new("gmail"));
    }
}
