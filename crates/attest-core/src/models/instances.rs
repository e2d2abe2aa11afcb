//! `/admin/instances` record shape.

use serde::{Deserialize, Serialize};

/// A connector sync record as returned by `GET /admin/instances`.
///
/// Deserialize this only from data that already passed the schema validator;
/// the raw endpoint sometimes sends the counters as numeric strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminInstance {
    pub id: i64,
    pub tenant_id: String,
    pub connector_id: String,
    pub display_name: String,
    pub enabled: bool,
    pub settings_json: String,
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
    pub created_utc: String,
    pub updated_utc: String,
    pub total_items_processed: i64,
    #[serde(default)]
    pub last_sync_utc: Option<String>,
    #[serde(default)]
    pub sync_phase: Option<String>,
    pub entity_resolution_completed: i64,
}

impl AdminInstance {
    /// Whether the last sync reported an error.
    pub fn has_error(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }

    /// Whether the connector has completed at least one sync.
    pub const fn has_synced(&self) -> bool {
        self.last_sync_utc.is_some()
    }
}
