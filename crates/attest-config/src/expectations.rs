//! Expected values checked against a deployment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExpectationsConfig {
    /// Expected `totalItemsProcessed` per connector id.
    #[serde(default)]
    pub connectors: BTreeMap<String, i64>,
}

impl ExpectationsConfig {
    /// `(connector_id, expected)` pairs in connector id order.
    pub fn connector_counts(&self) -> impl Iterator<Item = (&str, i64)> {
        self.connectors
            .iter()
            .map(|(connector_id, expected)| (connector_id.as_str(), *expected))
    }
}
