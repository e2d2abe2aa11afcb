use anyhow::Context;
use attest_check::check_connector_counts;
use attest_client::ApiClient;
use attest_config::AttestConfig;
use attest_core::AdminInstance;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ConnectorsArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ConnectorRow {
    connector_id: String,
    expected: i64,
    actual: Option<i64>,
    passed: bool,
}

#[derive(Debug, Serialize)]
struct ConnectorsReport {
    passed: bool,
    connectors: Vec<ConnectorRow>,
}

pub async fn handle(
    args: &ConnectorsArgs,
    client: &ApiClient,
    config: &AttestConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let expectations: Vec<(String, i64)> = if args.expect.is_empty() {
        config
            .expectations
            .connector_counts()
            .map(|(id, expected)| (id.to_string(), expected))
            .collect()
    } else {
        args.expect.clone()
    };
    if expectations.is_empty() {
        anyhow::bail!(
            "no connector expectations: pass --expect ID=COUNT or set [expectations.connectors]"
        );
    }

    let instances = client
        .fetch_instances()
        .await
        .context("instances do not match expected schema")?;

    let result = check_connector_counts(
        &instances,
        expectations.iter().map(|(id, expected)| (id.as_str(), *expected)),
    );

    let report = ConnectorsReport {
        passed: result.is_ok(),
        connectors: rows(&instances, &expectations),
    };
    output(&report, flags.format)?;

    result.context("connector items validation failed")
}

fn rows(instances: &[AdminInstance], expectations: &[(String, i64)]) -> Vec<ConnectorRow> {
    expectations
        .iter()
        .map(|(connector_id, expected)| {
            let actual = instances
                .iter()
                .find(|instance| &instance.connector_id == connector_id)
                .map(|instance| instance.total_items_processed);
            ConnectorRow {
                connector_id: connector_id.clone(),
                expected: *expected,
                actual,
                passed: actual == Some(*expected),
            }
        })
        .collect()
}
