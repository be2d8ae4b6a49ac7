//! Application service: artifact export, import and clipboard copy.
//!
//! Purely local I/O, routed through the [`ArtifactStore`], [`FilePicker`] and
//! [`Clipboard`] ports.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::ports::{
    ArtifactStore, Clipboard, FilePicker, ModalNotice, Notifier, Severity,
};
use crate::domain::artifact::{
    ARTIFACT_MIME, ExportFormat, IMPORTABLE_EXTENSIONS, ProgramArtifact, base_name,
    check_importable,
};
use crate::domain::error::{ValidationError, WorkflowError};

pub const COPIED: &str = "Code copied to clipboard!";
pub const COPY_FAILED: &str = "Failed to copy code.";

/// Save the artifact as `<sanitized base>.<ext>` inside `dir`.
///
/// Code and base name are checked independently, code first.
///
/// # Errors
///
/// Returns a [`WorkflowError`] after it has been shown.
pub fn export(
    artifact: &ProgramArtifact,
    base_name_input: &str,
    format: ExportFormat,
    dir: &Path,
    store: &impl ArtifactStore,
    ui: &impl Notifier,
) -> Result<PathBuf, WorkflowError> {
    let checked = artifact
        .trimmed_code()
        .ok_or_else(|| format.empty_code_error())
        .and_then(|code| Ok((code, base_name(base_name_input)?)));
    let (code, base) = alert_on_invalid(checked, ui)?;

    let file_name = format!("{base}.{}", format.extension());
    match store.save(dir, &file_name, ARTIFACT_MIME, code.as_bytes()) {
        Ok(path) => {
            debug!(path = %path.display(), "artifact exported");
            ui.notify(Severity::Success, &format!("Saved {}", path.display()));
            Ok(path)
        }
        Err(err) => {
            let message = format!("Could not save {file_name}: {err:#}");
            ui.notify(Severity::Error, &message);
            Err(WorkflowError::Local(message))
        }
    }
}

/// Export with the `.txt` extension.
///
/// # Errors
///
/// See [`export`].
pub fn export_as_text(
    artifact: &ProgramArtifact,
    base_name_input: &str,
    dir: &Path,
    store: &impl ArtifactStore,
    ui: &impl Notifier,
) -> Result<PathBuf, WorkflowError> {
    export(artifact, base_name_input, ExportFormat::Text, dir, store, ui)
}

/// Export with the `.lua` extension.
///
/// # Errors
///
/// See [`export`].
pub fn export_as_executable(
    artifact: &ProgramArtifact,
    base_name_input: &str,
    dir: &Path,
    store: &impl ArtifactStore,
    ui: &impl Notifier,
) -> Result<PathBuf, WorkflowError> {
    export(artifact, base_name_input, ExportFormat::Lua, dir, store, ui)
}

/// Let the user pick a `.lua`/`.txt` file and load it as the artifact code.
///
/// Choosing nothing is a no-op and returns `Ok(None)`.
///
/// # Errors
///
/// Returns a [`WorkflowError`] after it has been shown.
pub fn import_from_file(
    artifact: &mut ProgramArtifact,
    picker: &impl FilePicker,
    store: &impl ArtifactStore,
    ui: &impl Notifier,
) -> Result<Option<PathBuf>, WorkflowError> {
    let chosen = picker.pick(IMPORTABLE_EXTENSIONS).map_err(|err| {
        let message = format!("Could not open the file picker: {err:#}");
        ui.notify(Severity::Error, &message);
        WorkflowError::Local(message)
    })?;
    let Some(path) = chosen else {
        debug!("import cancelled, no file chosen");
        return Ok(None);
    };
    import_path(artifact, &path, store, ui)?;
    Ok(Some(path))
}

/// Load `path` as the artifact code, verbatim.
///
/// # Errors
///
/// Returns a [`WorkflowError`] after it has been shown.
pub fn import_path(
    artifact: &mut ProgramArtifact,
    path: &Path,
    store: &impl ArtifactStore,
    ui: &impl Notifier,
) -> Result<(), WorkflowError> {
    alert_on_invalid(check_importable(path), ui)?;
    match store.read_text(path) {
        Ok(code) => {
            debug!(path = %path.display(), bytes = code.len(), "artifact imported");
            artifact.replace(code);
            Ok(())
        }
        Err(err) => {
            let message = format!("Could not read {}: {err:#}", path.display());
            ui.modal(&ModalNotice::new(message.clone()));
            Err(WorkflowError::Local(message))
        }
    }
}

/// Put the artifact code on the clipboard.
///
/// # Errors
///
/// Returns a [`WorkflowError`] after it has been shown.
pub fn copy_to_clipboard(
    artifact: &ProgramArtifact,
    clipboard: &impl Clipboard,
    ui: &impl Notifier,
) -> Result<(), WorkflowError> {
    let code = alert_on_invalid(
        artifact.trimmed_code().ok_or(ValidationError::NoCodeToCopy),
        ui,
    )?;
    match clipboard.write_text(code) {
        Ok(()) => {
            ui.notify(Severity::Success, COPIED);
            Ok(())
        }
        Err(err) => {
            warn!(error = %err, "clipboard write failed");
            ui.notify(Severity::Error, COPY_FAILED);
            Err(WorkflowError::Local(COPY_FAILED.to_string()))
        }
    }
}

fn alert_on_invalid<T>(
    checked: Result<T, ValidationError>,
    ui: &impl Notifier,
) -> Result<T, WorkflowError> {
    checked.map_err(|err| {
        ui.alert(&err.to_string());
        err.into()
    })
}
