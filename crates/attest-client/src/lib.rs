//! # attest-client
//!
//! HTTP client for the endpoints attest checks:
//! - `GET /admin/instances` ([`ApiClient::fetch_instances`])
//! - `POST /chat` ([`ApiClient::send_chat`])
//!
//! Each operation is exactly one HTTP call. The `*_raw` variants return the
//! untyped JSON body so callers can run their own validation on it.

mod chat;
mod error;
pub mod http;
mod instances;

pub use chat::CHAT_PATH;
pub use error::ClientError;
pub use instances::INSTANCES_PATH;

use attest_config::ApiConfig;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

/// Client bound to one deployment of the service under test.
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Build a client from connection settings.
    ///
    /// Certificate verification is skipped when
    /// [`ApiConfig::accept_invalid_certs`] is set.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidHeader`] if the configured `Accept`
    /// value is not a valid header, or [`ClientError::Http`] if the
    /// underlying client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
        let accept =
            HeaderValue::from_str(&config.accept).map_err(|e| ClientError::InvalidHeader {
                header: "accept",
                reason: e.to_string(),
            })?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, accept);

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .default_headers(headers)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self { http, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint_url(path)
    }
}
