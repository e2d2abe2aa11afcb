use attest_client::ApiClient;
use attest_config::AttestConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod chat;
pub mod connectors;
pub mod instances;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    client: &ApiClient,
    config: &AttestConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Instances(args) => instances::handle(&args, client, flags).await,
        Commands::Connectors(args) => connectors::handle(&args, client, config, flags).await,
        Commands::Chat(args) => chat::handle(&args, client, config, flags).await,
    }
}
