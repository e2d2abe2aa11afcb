//! # attest-config
//!
//! Layered configuration loading for attest using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ATTEST_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `.attest/config.toml`
//! 4. User-level `~/.config/attest/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ATTEST_API__BASE_URL` -> `api.base_url`,
//! `ATTEST_EXPECTATIONS__CONNECTORS__GMAIL` -> `expectations.connectors.gmail`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use attest_config::AttestConfig;
//!
//! let config = AttestConfig::load_with_dotenv(None).expect("config");
//! println!("Target: {}", config.api.base_url);
//! ```

mod api;
mod chat;
mod error;
mod expectations;

pub use api::ApiConfig;
pub use chat::ChatConfig;
pub use error::ConfigError;
pub use expectations::ExpectationsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttestConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub expectations: ExpectationsConfig,
}

impl AttestConfig {
    /// Load configuration from all sources and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed, or
    /// [`ConfigError::InvalidValue`] if the merged values are unusable.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(explicit).extract()?;
        config.api.validate()?;
        Ok(config)
    }

    /// Load configuration after reading a `.env` file, if one exists.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load(explicit)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".attest/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // An explicit file must exist; figment reports it missing otherwise.
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment.merge(Env::prefixed("ATTEST_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("attest").join("config.toml"))
    }

    /// Load `.env` from the workspace root, falling back to the current dir.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AttestConfig::default();
        assert!(config.api.validate().is_ok());
        assert!(!config.chat.is_configured());
        assert!(config.expectations.connectors.is_empty());
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: AttestConfig = AttestConfig::figment(None).extract()?;
            assert_eq!(config.api.timeout_secs, 30);
            assert!(config.chat.include_answer_log);
            Ok(())
        });
    }
}
