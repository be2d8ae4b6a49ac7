//! `ccdeploy provision`: create the ComputerCraft folders in a world.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::app::AppContext;
use crate::application::ports::WorldApi;
use crate::application::services::workbench::Workbench;
use crate::commands::failed;
use crate::output::json;

/// Arguments for the provision command.
#[derive(Args)]
pub struct ProvisionArgs {
    /// World (save folder) name
    pub world: String,
}

/// Run `ccdeploy provision <WORLD>`.
///
/// # Errors
///
/// Returns an error only if JSON rendering fails.
pub async fn run(app: &AppContext, args: &ProvisionArgs, api: &impl WorldApi) -> Result<ExitCode> {
    let ui = app.notifier();
    let mut bench = Workbench::new();
    args.world.clone_into(&mut bench.world_name);

    if let Err(err) = bench.provision(api, &ui).await {
        return failed(app, &err);
    }

    if app.is_json() {
        json::print(&json!({
            "world": bench.world_name.trim(),
            "status": bench.connection.status(),
            "computer_ids": bench.registry.ids(),
        }))?;
    } else {
        app.renderer().render_computers(bench.registry.ids(), None);
    }
    Ok(ExitCode::SUCCESS)
}
