//! `ccdeploy computers`: list the computers of the connected world.

use std::process::ExitCode;

use anyhow::Result;
use serde_json::json;

use crate::app::AppContext;
use crate::application::ports::WorldApi;
use crate::application::services::registry::ComputerRegistry;
use crate::commands::failed;
use crate::output::json;

/// Run `ccdeploy computers`.
///
/// # Errors
///
/// Returns an error only if JSON rendering fails.
pub async fn run(app: &AppContext, api: &impl WorldApi) -> Result<ExitCode> {
    let ui = app.notifier();
    let mut registry = ComputerRegistry::new();
    if let Err(err) = registry.refresh(api, &ui).await {
        return failed(app, &err);
    }

    if app.is_json() {
        json::print(&json!({ "computer_ids": registry.ids() }))?;
    } else {
        app.renderer().render_computers(registry.ids(), None);
    }
    Ok(ExitCode::SUCCESS)
}
