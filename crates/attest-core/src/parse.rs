//! Typed parsing of chat responses.

use serde_json::Value;

use crate::errors::ShapeError;
use crate::models::ChatResponse;

/// Parse a `/chat` body, checking the core fields before full deserialization.
///
/// `answer` must be a string and `sessionId` an integer. Remaining fields
/// are handled by serde, and a failure there is reported against `body`
/// with serde's message as the found value.
///
/// # Errors
///
/// Returns [`ShapeError`] naming the first offending field.
pub fn parse_chat_response(raw: &Value) -> Result<ChatResponse, ShapeError> {
    let object = raw
        .as_object()
        .ok_or_else(|| ShapeError::mismatch(None, "<root>", "object", raw))?;

    match object.get("answer") {
        Some(Value::String(_)) => {}
        Some(other) => return Err(ShapeError::mismatch(None, "answer", "string", other)),
        None => return Err(ShapeError::missing(None, "answer", "string")),
    }

    match object.get("sessionId") {
        Some(Value::Number(n)) if n.is_i64() => {}
        Some(other) => return Err(ShapeError::mismatch(None, "sessionId", "integer", other)),
        None => return Err(ShapeError::missing(None, "sessionId", "integer")),
    }

    serde_json::from_value(raw.clone())
        .map_err(|e| ShapeError::new(None, "body", "chat response", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_minimal_response() {
        let response = parse_chat_response(&json!({
            "answer": "You have 3 emails.",
            "sessionId": 12,
            "citations": []
        }))
        .unwrap();
        assert_eq!(response.session_id, 12);
        assert_eq!(response.answer, "You have 3 emails.");
    }

    #[test]
    fn rejects_string_session_id() {
        let err = parse_chat_response(&json!({ "answer": "a", "sessionId": "12" })).unwrap_err();
        assert_eq!(err.field, "sessionId");
        assert_eq!(err.found, "string");
    }

    #[test]
    fn rejects_missing_answer() {
        let err = parse_chat_response(&json!({ "sessionId": 1 })).unwrap_err();
        assert_eq!(err.field, "answer");
        assert_eq!(err.found, "nothing");
    }

    #[test]
    fn reports_nested_failures_against_body() {
        let err = parse_chat_response(&json!({
            "answer": "a",
            "sessionId": 1,
            "answerLog": { "retrieval": { "chunks": [{ "chunkId": "c1", "score": 0.4 }] } }
        }))
        .unwrap_err();
        assert_eq!(err.field, "body");
        assert!(err.found.contains("dataItem"), "unexpected message: {}", err.found);
    }

    #[test]
    fn rejects_non_object_body() {
        let err = parse_chat_response(&json!("plain text")).unwrap_err();
        assert_eq!(err.expected, "object");
    }
}
