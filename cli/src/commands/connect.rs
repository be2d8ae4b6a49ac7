//! `ccdeploy connect`: open a world and list its computers.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::app::AppContext;
use crate::application::ports::WorldApi;
use crate::application::services::connection::ConnectOutcome;
use crate::application::services::workbench::Workbench;
use crate::commands::failed;
use crate::output::json;

/// Arguments for the connect command.
#[derive(Args)]
pub struct ConnectArgs {
    /// World (save folder) name
    pub world: String,

    /// Create the ComputerCraft folders without asking if they are missing
    #[arg(long)]
    pub provision: bool,
}

/// Run `ccdeploy connect <WORLD> [--provision]`.
///
/// # Errors
///
/// Returns an error if a prompt or JSON rendering fails. Workflow failures
/// have already been shown and map to a failure exit code.
pub async fn run(app: &AppContext, args: &ConnectArgs, api: &impl WorldApi) -> Result<ExitCode> {
    let ui = app.notifier();
    let mut bench = Workbench::new();

    let outcome = match bench.connect(Some(&args.world), api, &ui).await {
        Ok(outcome) => outcome,
        Err(err) => return failed(app, &err),
    };

    if outcome == ConnectOutcome::NeedsProvisioning {
        let provision = args.provision
            || app.confirm(
                "ComputerCraft is not installed in this world. Create its folders now?",
                false,
            )?;
        if !provision {
            app.output.info(&format!(
                "To install it later, run: ccdeploy provision {}",
                bench.world_name.trim()
            ));
            return report(app, &bench);
        }
        if let Err(err) = bench.provision(api, &ui).await {
            return failed(app, &err);
        }
    }

    report(app, &bench)
}

fn report(app: &AppContext, bench: &Workbench) -> Result<ExitCode> {
    let session = bench.connection.session();
    if app.is_json() {
        json::print(&json!({
            "world": session.map(|s| s.name.as_str()),
            "status": bench.connection.status(),
            "computercraft_installed": bench.connection.subsystem_installed(),
            "computers_found": session.and_then(|s| s.computers_found),
            "max_computer_id": session.and_then(|s| s.max_computer_id),
            "computer_ids": bench.registry.ids(),
        }))?;
    } else if bench.connection.subsystem_installed() {
        app.renderer().render_computers(bench.registry.ids(), None);
    }
    Ok(ExitCode::SUCCESS)
}
