//! Application service: world connection and ComputerCraft provisioning.
//!
//! Owns the [`WorldSession`]. After a response that reports ComputerCraft as
//! installed, the controller refreshes the [`ComputerRegistry`]; the registry
//! never calls back.

use tracing::{debug, info, warn};

use crate::application::ports::{ModalNotice, Notifier, WorldApi};
use crate::application::services::registry::ComputerRegistry;
use crate::domain::error::{ApiError, WorkflowError};
use crate::domain::world::{WorldRequest, WorldSession, validate_world_name};

pub const CONNECTING: &str = "Connecting...";
pub const CONNECT_FAILED_STATUS: &str = "An error occurred while connecting.";
pub const CONNECT_FAILED: &str = "An error occurred while connecting to the world.";
pub const PROVISIONING: &str = "Creating ComputerCraft folders...";
pub const PROVISION_FAILED: &str = "An error occurred while creating ComputerCraft folders.";

/// Result of a successful connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// ComputerCraft is installed; `computers` is `None` when the follow-up
    /// listing failed (that failure has already been shown).
    Ready { computers: Option<usize> },
    /// ComputerCraft is missing; provisioning is on offer.
    NeedsProvisioning,
}

/// Holds the connected world and the status line.
#[derive(Debug, Clone, Default)]
pub struct ConnectionController {
    session: Option<WorldSession>,
    status: String,
    provision_offered: bool,
}

impl ConnectionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn session(&self) -> Option<&WorldSession> {
        self.session.as_ref()
    }

    /// Last status line.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether the provisioning affordance is currently shown.
    #[must_use]
    pub fn provision_offered(&self) -> bool {
        self.provision_offered
    }

    /// Installed flag of the current session; `false` without one.
    #[must_use]
    pub fn subsystem_installed(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.subsystem_installed)
    }

    /// Connect to `world_name`.
    ///
    /// A successful response replaces the session. A failed attempt keeps the
    /// previous session, including its installed flag, and only updates the
    /// status line.
    ///
    /// # Errors
    ///
    /// Returns a [`WorkflowError`] after it has been shown: an alert for a
    /// blank name (no request is sent), a modal for remote/transport failures.
    pub async fn connect(
        &mut self,
        world_name: &str,
        api: &impl WorldApi,
        registry: &mut ComputerRegistry,
        ui: &impl Notifier,
    ) -> Result<ConnectOutcome, WorkflowError> {
        let name = validated(world_name, ui)?;
        self.set_status(CONNECTING, ui);

        let request = WorldRequest {
            world_name: name.to_string(),
        };
        match api.connect(&request).await {
            Ok(response) => {
                info!(
                    world = name,
                    installed = response.computercraft_installed,
                    "connected"
                );
                let session = WorldSession::from_connect(name, &response);
                let installed = session.subsystem_installed;
                self.session = Some(session);
                self.set_status(&response.message, ui);
                self.provision_offered = !installed;
                if !installed {
                    return Ok(ConnectOutcome::NeedsProvisioning);
                }
                let computers = registry.refresh(api, ui).await.ok();
                Ok(ConnectOutcome::Ready { computers })
            }
            Err(err) => Err(self.fail(err, CONNECT_FAILED_STATUS, CONNECT_FAILED, ui)),
        }
    }

    /// Create the ComputerCraft folders in `world_name`.
    ///
    /// Returns the number of computers listed afterwards, or `None` when that
    /// listing failed.
    ///
    /// # Errors
    ///
    /// Same contract as [`ConnectionController::connect`]; the installed flag
    /// is left untouched on failure.
    pub async fn provision(
        &mut self,
        world_name: &str,
        api: &impl WorldApi,
        registry: &mut ComputerRegistry,
        ui: &impl Notifier,
    ) -> Result<Option<usize>, WorkflowError> {
        let name = validated(world_name, ui)?;
        self.set_status(PROVISIONING, ui);

        let request = WorldRequest {
            world_name: name.to_string(),
        };
        match api.create_computercraft(&request).await {
            Ok(response) => {
                info!(world = name, "computercraft provisioned");
                self.mark_installed(name, &response.message);
                self.set_status(&response.message, ui);
                self.provision_offered = false;
                Ok(registry.refresh(api, ui).await.ok())
            }
            Err(err) => Err(self.fail(err, PROVISION_FAILED, PROVISION_FAILED, ui)),
        }
    }

    fn mark_installed(&mut self, name: &str, message: &str) {
        match self.session.as_mut() {
            Some(session) if session.name == name => {
                session.subsystem_installed = true;
            }
            _ => {
                self.session = Some(WorldSession {
                    name: name.to_string(),
                    subsystem_installed: true,
                    status_text: message.to_string(),
                    computers_found: None,
                    max_computer_id: None,
                });
            }
        }
    }

    fn set_status(&mut self, text: &str, ui: &impl Notifier) {
        text.clone_into(&mut self.status);
        if let Some(session) = self.session.as_mut() {
            text.clone_into(&mut session.status_text);
        }
        ui.status(text);
    }

    fn fail(
        &mut self,
        err: ApiError,
        generic_status: &str,
        generic_modal: &str,
        ui: &impl Notifier,
    ) -> WorkflowError {
        let (status, notice) = match &err {
            ApiError::Rejected {
                message: Some(message),
                ..
            } => (message.clone(), ModalNotice::new(message.clone())),
            ApiError::Rejected { message: None, .. } => (
                generic_status.to_string(),
                ModalNotice::new(generic_modal),
            ),
            ApiError::Transport(detail) => {
                warn!(error = %detail, "world server unreachable");
                (
                    generic_status.to_string(),
                    ModalNotice::new(generic_modal).with_save_settings(),
                )
            }
        };
        debug!(error = %err, "world request failed");
        self.set_status(&status, ui);
        ui.modal(&notice);
        WorkflowError::from_api(err, generic_modal)
    }
}

fn validated<'a>(world_name: &'a str, ui: &impl Notifier) -> Result<&'a str, WorkflowError> {
    validate_world_name(world_name).map_err(|err| {
        ui.alert(&err.to_string());
        WorkflowError::from(err)
    })
}
