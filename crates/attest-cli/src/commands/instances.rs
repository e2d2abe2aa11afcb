use anyhow::Context;
use attest_check::parse_instances;
use attest_client::ApiClient;
use attest_core::AdminInstance;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InstancesArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct InstancesReport {
    count: usize,
    with_errors: usize,
    never_synced: usize,
    instances: Vec<AdminInstance>,
}

pub async fn handle(
    args: &InstancesArgs,
    client: &ApiClient,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let instances = if args.strict {
        let raw = client.fetch_instances_raw().await?;
        let instances = parse_instances(&raw).context("instances do not match expected schema")?;
        tracing::info!(count = instances.len(), "instances match expected schema (strict)");
        instances
    } else {
        client
            .fetch_instances()
            .await
            .context("instances do not match expected schema")?
    };

    let report = InstancesReport {
        count: instances.len(),
        with_errors: instances.iter().filter(|i| i.has_error()).count(),
        never_synced: instances.iter().filter(|i| !i.has_synced()).count(),
        instances,
    };
    output(&report, flags.format)
}
