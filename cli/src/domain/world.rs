//! World session state, computer identifiers and the server wire types.
//!
//! Pure data only: no I/O, no async.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::error::ValidationError;

// ── World session ────────────────────────────────────────────────────────────

/// The connected world, as last reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldSession {
    /// Trimmed, non-empty world name.
    pub name: String,
    /// Only trustworthy right after a connect or provisioning response.
    pub subsystem_installed: bool,
    /// Last status line reported for this world.
    pub status_text: String,
    /// Whether the server found any computer folders (connect only).
    pub computers_found: Option<bool>,
    /// Highest computer id recorded in the world's `ids.json` (connect only).
    pub max_computer_id: Option<u64>,
}

impl WorldSession {
    /// Build a session from a successful connect response.
    #[must_use]
    pub fn from_connect(name: &str, response: &ConnectResponse) -> Self {
        Self {
            name: name.to_string(),
            subsystem_installed: response.computercraft_installed,
            status_text: response.message.clone(),
            computers_found: response.computers_found,
            max_computer_id: response.max_computer_id,
        }
    }
}

/// Trim a world name and reject it when nothing is left.
///
/// # Errors
///
/// Returns [`ValidationError::MissingWorldName`] for empty or whitespace-only input.
pub fn validate_world_name(input: &str) -> Result<&str, ValidationError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingWorldName);
    }
    Ok(name)
}

// ── Computer identifiers ─────────────────────────────────────────────────────

/// Opaque identifier of a computer inside the connected world.
///
/// The server may send ids as JSON strings or numbers; both normalise to the
/// same textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EndpointId(String);

impl EndpointId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EndpointId {
    fn from(id: &str) -> Self {
        Self::new(id.trim())
    }
}

impl<'de> Deserialize<'de> for EndpointId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Number(number) => Self(number.to_string()),
        })
    }
}

// ── Wire types ───────────────────────────────────────────────────────────────

/// Body of `POST /api/connect` and `POST /api/create_computercraft`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldRequest {
    pub world_name: String,
}

/// Success body of `POST /api/connect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub computercraft_installed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computers_found: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_computer_id: Option<u64>,
}

/// Success body of `GET /api/get_computer_ids`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputerIdsResponse {
    pub computer_ids: Vec<EndpointId>,
}

/// Body of `POST /api/run_program`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunProgramRequest {
    pub computer_id: EndpointId,
    pub code: String,
    pub filename: String,
}

/// Any body that only carries a human-readable `message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Body of `GET /api/os_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub os_name: String,
    pub platform: String,
    pub system: String,
    pub release: String,
    #[serde(default)]
    pub is_wsl: bool,
}
