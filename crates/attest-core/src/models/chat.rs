//! `/chat` request and response shapes.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequestPayload {
    pub query: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_ids: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_answer_log: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<i64>,
}

impl ChatRequestPayload {
    pub fn new(query: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            model: model.into(),
            attachment_ids: None,
            include_answer_log: None,
            session_id: None,
        }
    }

    /// Ask the service to return `answerLog`, which carries retrieval chunks.
    #[must_use]
    pub const fn with_answer_log(mut self, include: bool) -> Self {
        self.include_answer_log = Some(include);
        self
    }

    /// Continue an existing chat session.
    #[must_use]
    pub const fn with_session_id(mut self, session_id: i64) -> Self {
        self.session_id = Some(session_id);
        self
    }

    #[must_use]
    pub fn with_attachments(mut self, attachment_ids: Vec<i64>) -> Self {
        self.attachment_ids = Some(attachment_ids);
        self
    }
}

/// Body returned by `POST /chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub answer: String,
    pub session_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub citations: Vec<Citation>,
    #[serde(default)]
    pub user_message_id: Option<i64>,
    #[serde(default)]
    pub assistant_message_id: Option<i64>,
    #[serde(default)]
    pub created_at_utc: Option<String>,
    #[serde(default)]
    pub answer_log: Option<AnswerLog>,
}

impl ChatResponse {
    /// Retrieval chunks from `answerLog.retrieval.chunks`.
    ///
    /// Any missing level of the nesting yields an empty slice.
    pub fn retrieval_chunks(&self) -> &[RetrievalChunk] {
        self.answer_log
            .as_ref()
            .and_then(|log| log.retrieval.as_ref())
            .and_then(|retrieval| retrieval.chunks.as_deref())
            .unwrap_or_default()
    }
}

/// A reference from the answer to a source document.
///
/// Only `source` and `external_id` take part in source-usage matching; the
/// rest is display metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    #[serde(default)]
    pub data_item_type: Option<String>,
    #[serde(default)]
    pub graph_id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub title_or_subject: Option<String>,
    #[serde(default)]
    pub created_at_utc: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub collection_type: Option<String>,
    #[serde(default)]
    pub collection_name: Option<String>,
    #[serde(default)]
    pub author_display: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub labels: Option<serde_json::Value>,
}

/// Diagnostic trace attached when `includeAnswerLog` was requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerLog {
    #[serde(default)]
    pub original_query: String,
    #[serde(default)]
    pub rewritten_query: Option<String>,
    #[serde(default)]
    pub retrieval: Option<Retrieval>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Retrieval {
    #[serde(default)]
    pub total_chunks: Option<u64>,
    #[serde(default)]
    pub total_data_items: Option<u64>,
    #[serde(default)]
    pub chunks: Option<Vec<RetrievalChunk>>,
}

/// A scored fragment of a source document used to ground the answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalChunk {
    pub chunk_id: String,
    pub score: f64,
    #[serde(default)]
    pub text_preview: String,
    pub data_item: DataItem,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entities: Vec<ChunkEntity>,
}

/// The document a retrieval chunk was cut from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataItem {
    pub source: String,
    pub external_id: String,
    #[serde(default)]
    pub graph_id: Option<String>,
    #[serde(default)]
    pub data_item_type: Option<String>,
    #[serde(default)]
    pub title_or_subject: Option<String>,
    #[serde(default)]
    pub created_at_utc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkEntity {
    pub label: String,
    pub key: String,
    pub display: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn payload_omits_unset_optionals() {
        let payload = ChatRequestPayload::new("who emailed me?", "gpt-4o");
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value, json!({ "query": "who emailed me?", "model": "gpt-4o" }));
    }

    #[test]
    fn payload_uses_camel_case() {
        let payload = ChatRequestPayload::new("q", "m")
            .with_answer_log(true)
            .with_session_id(7)
            .with_attachments(vec![1, 2]);
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "query": "q",
                "model": "m",
                "attachmentIds": [1, 2],
                "includeAnswerLog": true,
                "sessionId": 7
            })
        );
    }

    #[test]
    fn retrieval_chunks_empty_when_answer_log_absent() {
        let response: ChatResponse =
            serde_json::from_value(json!({ "answer": "hi", "sessionId": 1, "citations": [] }))
                .unwrap();
        assert!(response.retrieval_chunks().is_empty());
    }

    #[test]
    fn retrieval_chunks_empty_when_retrieval_has_no_chunks() {
        let response: ChatResponse = serde_json::from_value(json!({
            "answer": "hi",
            "sessionId": 1,
            "answerLog": { "originalQuery": "hi", "retrieval": { "totalChunks": 0 } }
        }))
        .unwrap();
        assert!(response.retrieval_chunks().is_empty());
        assert!(response.citations.is_empty());
    }

    #[test]
    fn null_citations_read_as_empty() {
        let response: ChatResponse =
            serde_json::from_value(json!({ "answer": "", "sessionId": 3, "citations": null }))
                .unwrap();
        assert!(response.citations.is_empty());
    }
}
