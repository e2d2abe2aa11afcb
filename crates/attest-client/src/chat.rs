//! `POST /chat`.

use attest_core::parse::parse_chat_response;
use attest_core::{ChatRequestPayload, ChatResponse};
use reqwest::header::{ACCEPT, HeaderValue};
use serde_json::Value;

use crate::{ApiClient, error::ClientError, http::read_json};

pub const CHAT_PATH: &str = "/chat";

const ENDPOINT: &str = "POST /chat";

impl ApiClient {
    /// Send a chat message and return the untyped JSON answer.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the status is not 200,
    /// or the body is not JSON.
    pub async fn send_chat_raw(&self, payload: &ChatRequestPayload) -> Result<Value, ClientError> {
        let url = self.url(CHAT_PATH);
        tracing::debug!(
            %url,
            model = %payload.model,
            session_id = ?payload.session_id,
            "sending chat message"
        );
        let resp = self
            .http
            .post(&url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(payload)
            .send()
            .await?;
        read_json(ENDPOINT, resp).await
    }

    /// Send a chat message and parse the answer.
    ///
    /// # Errors
    ///
    /// As [`Self::send_chat_raw`], plus [`ClientError::Shape`] if `answer`
    /// or `sessionId` is malformed or the body does not deserialize.
    pub async fn send_chat(&self, payload: &ChatRequestPayload) -> Result<ChatResponse, ClientError> {
        let raw = self.send_chat_raw(payload).await?;
        let response = parse_chat_response(&raw)?;
        tracing::info!(
            session_id = response.session_id,
            citations = response.citations.len(),
            chunks = response.retrieval_chunks().len(),
            "chat response received"
        );
        Ok(response)
    }
}
