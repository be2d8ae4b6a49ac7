//! Application service: computer registry use-cases.
//!
//! Holds the computer ids exposed by the connected world and the current
//! selection. Imports only from `crate::domain` and `crate::application::ports`.

use tracing::{debug, info};

use crate::application::ports::{ModalNotice, Notifier, WorldApi};
use crate::domain::error::{ValidationError, WorkflowError};
use crate::domain::world::EndpointId;

/// Shown when the list request cannot be completed.
pub const LIST_FAILED: &str = "An error occurred while fetching Computer IDs.";
/// Shown after a user-triggered refresh, whatever its outcome.
pub const REFRESHED: &str = "Computer IDs refreshed.";

/// Ordered computer ids plus at most one selected member.
#[derive(Debug, Clone, Default)]
pub struct ComputerRegistry {
    ids: Vec<EndpointId>,
    selected: Option<EndpointId>,
}

impl ComputerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids in server order.
    #[must_use]
    pub fn ids(&self) -> &[EndpointId] {
        &self.ids
    }

    #[must_use]
    pub fn selected(&self) -> Option<&EndpointId> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn contains(&self, id: &EndpointId) -> bool {
        self.ids.contains(id)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Fetch the ids from the server.
    ///
    /// On success the held list is replaced in server order and the selection
    /// is cleared. On failure the previous list is kept and a blocking modal
    /// shows the server's message.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Remote`] or [`WorkflowError::Transport`] after
    /// the failure has been shown.
    pub async fn refresh(
        &mut self,
        api: &impl WorldApi,
        ui: &impl Notifier,
    ) -> Result<usize, WorkflowError> {
        match api.list_computer_ids().await {
            Ok(ids) => {
                info!(count = ids.len(), "computer ids refreshed");
                self.ids = ids;
                self.selected = None;
                Ok(self.ids.len())
            }
            Err(err) => {
                debug!(error = %err, "listing computer ids failed");
                let err = WorkflowError::from_api(err, LIST_FAILED);
                ui.modal(&ModalNotice::new(err.to_string()));
                Err(err)
            }
        }
    }

    /// Select `id`, which must be in the current list.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoComputerSelected`] for a blank id and
    /// [`ValidationError::UnknownComputer`] for an id outside the list; both
    /// are shown as an alert first.
    pub fn select(&mut self, id: &str, ui: &impl Notifier) -> Result<&EndpointId, WorkflowError> {
        let id = EndpointId::from(id);
        let checked = if id.as_str().is_empty() {
            Err(ValidationError::NoComputerSelected)
        } else if !self.contains(&id) {
            Err(ValidationError::UnknownComputer(id.to_string()))
        } else {
            Ok(())
        };
        if let Err(err) = checked {
            ui.alert(&err.to_string());
            return Err(err.into());
        }
        debug!(computer_id = %id, "computer selected");
        Ok(self.selected.insert(id))
    }
}
