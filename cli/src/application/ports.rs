//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`: never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::domain::config::DeployConfig;
use crate::domain::error::ApiError;
use crate::domain::world::{
    ConnectResponse, EndpointId, MessageResponse, RunProgramRequest, ServerInfo, WorldRequest,
};

// ── World server port ─────────────────────────────────────────────────────────

/// The world server's JSON API.
///
/// Every method is a single best-effort round trip. Non-success statuses come
/// back as [`ApiError::Rejected`] carrying the body's `message` when present;
/// anything that prevents a usable response is [`ApiError::Transport`].
#[allow(async_fn_in_trait)]
pub trait WorldApi {
    /// `GET /api/get_computer_ids`
    async fn list_computer_ids(&self) -> Result<Vec<EndpointId>, ApiError>;
    /// `POST /api/connect`
    async fn connect(&self, request: &WorldRequest) -> Result<ConnectResponse, ApiError>;
    /// `POST /api/create_computercraft`
    async fn create_computercraft(
        &self,
        request: &WorldRequest,
    ) -> Result<MessageResponse, ApiError>;
    /// `POST /api/run_program`
    async fn run_program(&self, request: &RunProgramRequest)
    -> Result<MessageResponse, ApiError>;
    /// `GET /api/os_info`
    async fn server_info(&self) -> Result<ServerInfo, ApiError>;
}

// ── Notification port ─────────────────────────────────────────────────────────

/// Tone of a non-blocking notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A blocking, dismissible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalNotice {
    pub message: String,
    /// Offer the persisted-settings affordance alongside the message.
    pub offer_save_settings: bool,
}

impl ModalNotice {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            offer_save_settings: false,
        }
    }

    #[must_use]
    pub fn with_save_settings(mut self) -> Self {
        self.offer_save_settings = true;
        self
    }
}

/// Presents messages to the user. Sync trait: no async needed.
///
/// Implementations never call back into the services that use them.
pub trait Notifier {
    /// Replace the connection status line.
    fn status(&self, text: &str);
    /// Transient, lightweight alert (used for validation failures).
    fn alert(&self, message: &str);
    /// Non-blocking notification.
    fn notify(&self, severity: Severity, message: &str);
    /// Blocking modal; returns once the user dismissed it.
    fn modal(&self, notice: &ModalNotice);
}

// ── Local artifact ports ──────────────────────────────────────────────────────

/// Reads and writes program files on the local filesystem.
pub trait ArtifactStore {
    /// Save `contents` as `dir/file_name`, tagged with `mime`, and return the final path.
    ///
    /// The write must be atomic: either the complete file appears or nothing does.
    fn save(&self, dir: &Path, file_name: &str, mime: &str, contents: &[u8]) -> Result<PathBuf>;
    /// Read a whole file as text. Bytes that are not valid UTF-8 decode as U+FFFD.
    fn read_text(&self, path: &Path) -> Result<String>;
}

/// Lets the user choose a local file to import.
pub trait FilePicker {
    /// Ask for a file restricted to the given extensions.
    ///
    /// Returns `Ok(None)` when the user chose nothing.
    fn pick(&self, extensions: &[&str]) -> Result<Option<PathBuf>>;
}

/// System clipboard access.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    fn write_text(&self, text: &str) -> Result<()>;
}

// ── Configuration port ────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load the configuration, returning defaults when no file exists.
    fn load(&self) -> Result<DeployConfig>;
    /// Persist the configuration.
    fn save(&self, config: &DeployConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}
