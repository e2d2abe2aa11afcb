//! Target service connection settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_base_url() -> String {
    "https://localhost:5199".to_string()
}

/// Local deployments run with self-signed certificates.
const fn default_accept_invalid_certs() -> bool {
    true
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_accept() -> String {
    "text/plain".to_string()
}

fn default_user_agent() -> String {
    concat!("attest/", env!("CARGO_PKG_VERSION")).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Service root, e.g. `https://localhost:5199`. Endpoint paths are appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Skip TLS certificate verification.
    #[serde(default = "default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Default `Accept` header for requests that do not set their own.
    #[serde(default = "default_accept")]
    pub accept: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            accept_invalid_certs: default_accept_invalid_certs(),
            timeout_secs: default_timeout_secs(),
            accept: default_accept(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Reject values the HTTP client cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when `base_url` has no
    /// `http://` or `https://` scheme, or `timeout_secs` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: format!("'{}' must start with http:// or https://", self.base_url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Full URL for `path`, joined with exactly one `/`.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub const fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}
