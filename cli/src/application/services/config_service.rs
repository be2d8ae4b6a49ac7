//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::DeployConfig;

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the store cannot read or parse the file.
pub fn load_config(store: &impl ConfigStore) -> Result<DeployConfig> {
    store.load()
}

/// Validate and persist a single `key = value` setting, returning the new config.
///
/// # Errors
///
/// Returns an error if validation fails or the store cannot write.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<DeployConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    Ok(config)
}

/// Server URL to use: an explicit override wins over the stored setting.
#[must_use]
pub fn resolve_server_url(config: &DeployConfig, override_url: Option<&str>) -> String {
    override_url
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| config.server.url.clone())
}
