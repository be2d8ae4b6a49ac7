//! Domain types and validators for ccdeploy configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &["server.url", "export.dir"];
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.ccdeploy/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DeployConfig {
    /// World server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

/// World server connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the world server.
    #[serde(default = "default_server_url")]
    pub url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
        }
    }
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

/// Where exported programs are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Target directory; the current directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

impl DeployConfig {
    /// Apply a validated `key = value` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or value is rejected by the validators.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "server.url" => self.server.url = value.trim_end_matches('/').to_string(),
            "export.dir" => self.export.dir = Some(value.to_string()),
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    match key {
        "server.url" => validate_server_url(value),
        "export.dir" if value.trim().is_empty() => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            hint: "Directory must not be empty".to_string(),
        }
        .into()),
        _ => Ok(()),
    }
}

/// Validates a server base URL.
///
/// # Errors
///
/// Returns an error unless the URL starts with `http://` or `https://` and has a host.
pub fn validate_server_url(value: &str) -> Result<()> {
    let rest = value
        .strip_prefix("http://")
        .or_else(|| value.strip_prefix("https://"));
    match rest {
        Some(host) if !host.trim_matches('/').is_empty() && !host.contains(char::is_whitespace) => {
            Ok(())
        }
        _ => Err(ConfigError::InvalidValue {
            key: "server.url".to_string(),
            value: value.to_string(),
            hint: "Expected an http:// or https:// URL, e.g. http://127.0.0.1:5000".to_string(),
        }
        .into()),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
