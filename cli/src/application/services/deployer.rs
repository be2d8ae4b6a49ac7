//! Application service: deploy a program to a computer and run it.

use tracing::{debug, info};

use crate::application::ports::{Notifier, Severity, WorldApi};
use crate::domain::artifact::{ProgramArtifact, derive_file_name};
use crate::domain::error::{ValidationError, WorkflowError};
use crate::domain::world::{EndpointId, RunProgramRequest};

pub const RUN_FAILED: &str = "An error occurred while running the program.";

/// Build the run request, checking inputs in order: computer, code, name.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn prepare(
    computer: Option<&EndpointId>,
    artifact: &ProgramArtifact,
    file_name_input: &str,
) -> Result<RunProgramRequest, ValidationError> {
    let computer = computer.ok_or(ValidationError::NoComputerSelected)?;
    let code = artifact.trimmed_code().ok_or(ValidationError::NoCodeToRun)?;
    let filename = derive_file_name(file_name_input, "lua")?;
    Ok(RunProgramRequest {
        computer_id: computer.clone(),
        code: code.to_string(),
        filename,
    })
}

/// Send the artifact to `computer` under the sanitized program name.
///
/// The server's message is shown verbatim as a non-blocking notification
/// whether the run succeeded or not. Returns that message.
///
/// # Errors
///
/// Returns a [`WorkflowError`] after it has been shown. Validation failures
/// never reach the network.
pub async fn run(
    computer: Option<&EndpointId>,
    artifact: &ProgramArtifact,
    file_name_input: &str,
    api: &impl WorldApi,
    ui: &impl Notifier,
) -> Result<String, WorkflowError> {
    let request = prepare(computer, artifact, file_name_input).map_err(|err| {
        ui.alert(&err.to_string());
        WorkflowError::from(err)
    })?;

    debug!(
        computer_id = %request.computer_id,
        filename = %request.filename,
        bytes = request.code.len(),
        "deploying program"
    );
    match api.run_program(&request).await {
        Ok(response) => {
            info!(computer_id = %request.computer_id, "program deployed");
            ui.notify(Severity::Success, &response.message);
            Ok(response.message)
        }
        Err(err) => {
            let err = WorkflowError::from_api(err, RUN_FAILED);
            ui.notify(Severity::Error, &err.to_string());
            Err(err)
        }
    }
}
