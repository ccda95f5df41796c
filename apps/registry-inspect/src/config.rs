//! Layered configuration for `registry-inspect`.
//!
//! Precedence: defaults → YAML file (`--config`) → environment (`REGISTRY_INSPECT__*`).

use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use reflection_registry::RegistryConfig;
use serde::Deserialize;

/// Environment prefix; nested keys are separated by `__`,
/// e.g. `REGISTRY_INSPECT__REGISTRY__REJECT_UNKNOWN_FIELDS=true`.
pub const ENV_PREFIX: &str = "REGISTRY_INSPECT__";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct InspectConfig {
    /// Snapshot loader settings.
    pub registry: RegistryConfig,
}

impl InspectConfig {
    /// Loads the layered configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is given but missing, or if any layer fails
    /// to deserialize.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            if !path.is_file() {
                anyhow::bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment
            .extract()
            .context("failed to load registry-inspect configuration")
    }
}
