//! `GET /admin/instances`.

use attest_check::prepare_instances;
use attest_core::AdminInstance;
use serde_json::Value;

use crate::{ApiClient, error::ClientError, http::read_json};

pub const INSTANCES_PATH: &str = "/admin/instances";

const ENDPOINT: &str = "GET /admin/instances";

impl ApiClient {
    /// Fetch the instance list as untyped JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the status is not 200,
    /// or the body is not JSON.
    pub async fn fetch_instances_raw(&self) -> Result<Value, ClientError> {
        let url = self.url(INSTANCES_PATH);
        tracing::debug!(%url, "fetching admin instances");
        let resp = self.http.get(&url).send().await?;
        read_json(ENDPOINT, resp).await
    }

    /// Fetch the instance list, normalizing loose encodings and validating
    /// every record.
    ///
    /// # Errors
    ///
    /// As [`Self::fetch_instances_raw`], plus [`ClientError::Check`] if the
    /// body does not have the instance shape.
    pub async fn fetch_instances(&self) -> Result<Vec<AdminInstance>, ClientError> {
        let raw = self.fetch_instances_raw().await?;
        Ok(prepare_instances(&raw)?)
    }
}
