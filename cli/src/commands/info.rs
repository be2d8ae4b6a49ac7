//! `ccdeploy info`: show the platform the world server runs on.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::{ModalNotice, Notifier, WorldApi};
use crate::commands::failed;
use crate::domain::error::{ApiError, WorkflowError};
use crate::output::json;

const INFO_FAILED: &str = "An error occurred while fetching server information.";

/// Run `ccdeploy info`.
///
/// # Errors
///
/// Returns an error only if JSON rendering fails.
pub async fn run(app: &AppContext, api: &impl WorldApi) -> Result<ExitCode> {
    let ui = app.notifier();
    let info = match api.server_info().await {
        Ok(info) => info,
        Err(err) => {
            let unreachable = matches!(err, ApiError::Transport(_));
            let err = WorkflowError::from_api(err, INFO_FAILED);
            let notice = ModalNotice::new(err.to_string());
            ui.modal(&if unreachable {
                notice.with_save_settings()
            } else {
                notice
            });
            return failed(app, &err);
        }
    };

    if app.is_json() {
        json::print(&info)?;
    } else {
        app.renderer().render_server_info(&app.server_url, &info);
    }
    Ok(ExitCode::SUCCESS)
}
