//! Application service: the state of one interactive session.
//!
//! A `Workbench` owns the connection controller, the computer registry, the
//! active program artifact and the two text inputs (world name, program
//! name). Nothing here outlives the session.

use std::path::{Path, PathBuf};

use crate::application::ports::{
    ArtifactStore, Clipboard, FilePicker, Notifier, Severity, WorldApi,
};
use crate::application::services::connection::{ConnectOutcome, ConnectionController};
use crate::application::services::registry::{ComputerRegistry, REFRESHED};
use crate::application::services::{deployer, exporter};
use crate::domain::artifact::{ExportFormat, ProgramArtifact};
use crate::domain::error::WorkflowError;
use crate::domain::world::EndpointId;

#[derive(Debug, Default)]
pub struct Workbench {
    pub connection: ConnectionController,
    pub registry: ComputerRegistry,
    pub artifact: ProgramArtifact,
    /// Current world-name input.
    pub world_name: String,
    /// Current program-name input.
    pub program_name: String,
}

impl Workbench {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect to `world`, or to the current world-name input when `None`.
    ///
    /// # Errors
    ///
    /// See [`ConnectionController::connect`].
    pub async fn connect(
        &mut self,
        world: Option<&str>,
        api: &impl WorldApi,
        ui: &impl Notifier,
    ) -> Result<ConnectOutcome, WorkflowError> {
        if let Some(world) = world {
            world.clone_into(&mut self.world_name);
        }
        self.connection
            .connect(&self.world_name, api, &mut self.registry, ui)
            .await
    }

    /// Provision ComputerCraft in the world named by the current input.
    ///
    /// # Errors
    ///
    /// See [`ConnectionController::provision`].
    pub async fn provision(
        &mut self,
        api: &impl WorldApi,
        ui: &impl Notifier,
    ) -> Result<Option<usize>, WorkflowError> {
        self.connection
            .provision(&self.world_name, api, &mut self.registry, ui)
            .await
    }

    /// User-triggered refresh; always ends with the "refreshed" notice.
    ///
    /// # Errors
    ///
    /// See [`ComputerRegistry::refresh`].
    pub async fn refresh(
        &mut self,
        api: &impl WorldApi,
        ui: &impl Notifier,
    ) -> Result<usize, WorkflowError> {
        let result = self.registry.refresh(api, ui).await;
        ui.notify(Severity::Info, REFRESHED);
        result
    }

    /// # Errors
    ///
    /// See [`ComputerRegistry::select`].
    pub fn select(&mut self, id: &str, ui: &impl Notifier) -> Result<EndpointId, WorkflowError> {
        self.registry.select(id, ui).cloned()
    }

    /// Deploy the artifact to the selected computer.
    ///
    /// # Errors
    ///
    /// See [`deployer::run`].
    pub async fn run(
        &self,
        api: &impl WorldApi,
        ui: &impl Notifier,
    ) -> Result<String, WorkflowError> {
        deployer::run(
            self.registry.selected(),
            &self.artifact,
            &self.program_name,
            api,
            ui,
        )
        .await
    }

    /// # Errors
    ///
    /// See [`exporter::export`].
    pub fn export(
        &self,
        format: ExportFormat,
        dir: &Path,
        store: &impl ArtifactStore,
        ui: &impl Notifier,
    ) -> Result<PathBuf, WorkflowError> {
        exporter::export(&self.artifact, &self.program_name, format, dir, store, ui)
    }

    /// Import through the picker, or directly from `path` when given.
    ///
    /// # Errors
    ///
    /// See [`exporter::import_from_file`].
    pub fn import(
        &mut self,
        path: Option<&Path>,
        picker: &impl FilePicker,
        store: &impl ArtifactStore,
        ui: &impl Notifier,
    ) -> Result<Option<PathBuf>, WorkflowError> {
        match path {
            Some(path) => exporter::import_path(&mut self.artifact, path, store, ui)
                .map(|()| Some(path.to_path_buf())),
            None => exporter::import_from_file(&mut self.artifact, picker, store, ui),
        }
    }

    /// # Errors
    ///
    /// See [`exporter::copy_to_clipboard`].
    pub fn copy(&self, clipboard: &impl Clipboard, ui: &impl Notifier) -> Result<(), WorkflowError> {
        exporter::copy_to_clipboard(&self.artifact, clipboard, ui)
    }
}
