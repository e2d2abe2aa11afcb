use anyhow::Context;
use attest_config::AttestConfig;

use crate::cli::GlobalFlags;

/// Load layered config, then apply command-line overrides on top.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<AttestConfig> {
    let mut config = AttestConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load attest configuration")?;

    if let Some(base_url) = &flags.base_url {
        config.api.base_url.clone_from(base_url);
        config
            .api
            .validate()
            .context("invalid --base-url / API_BASE_URL")?;
    }

    Ok(config)
}
