//! Client error types.

use attest_check::CheckError;
use attest_core::ShapeError;
use thiserror::Error;

/// Errors that can occur when calling the service under test.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with something other than 200.
    #[error("{endpoint} returned {status}, expected 200: {body}")]
    UnexpectedStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The body was not valid JSON.
    #[error("{endpoint} returned a body that is not JSON: {message}")]
    Decode { endpoint: String, message: String },

    /// The JSON did not have the endpoint's shape.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Check(#[from] CheckError),

    /// A configured header value cannot be sent.
    #[error("invalid header value for {header}: {reason}")]
    InvalidHeader { header: &'static str, reason: String },
}
