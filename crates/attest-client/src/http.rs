//! Shared HTTP response handling for endpoint calls.
//!
//! The harness treats any status other than 200 as a failure, and reads the
//! body as JSON before any typed parsing so shape errors can name fields.

use serde_json::Value;

use crate::error::ClientError;

/// Return the response unchanged if its status is exactly 200.
///
/// # Errors
///
/// Returns [`ClientError::UnexpectedStatus`] with the response body for any
/// other status.
pub async fn check_response(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    let status = resp.status().as_u16();
    tracing::debug!(endpoint, status, "response received");
    if status != 200 {
        return Err(ClientError::UnexpectedStatus {
            endpoint: endpoint.to_string(),
            status,
            body: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Check the status and read the body as untyped JSON.
///
/// # Errors
///
/// Returns [`ClientError::UnexpectedStatus`] for a non-200 status and
/// [`ClientError::Decode`] if the body is not JSON.
pub async fn read_json(endpoint: &str, resp: reqwest::Response) -> Result<Value, ClientError> {
    let text = check_response(endpoint, resp).await?.text().await?;
    serde_json::from_str(&text).map_err(|e| ClientError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}
