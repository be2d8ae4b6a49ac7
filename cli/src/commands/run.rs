//! `ccdeploy run`: deploy a program to a computer and start it.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::app::AppContext;
use crate::application::ports::{Notifier, WorldApi};
use crate::application::services::deployer;
use crate::application::services::workbench::Workbench;
use crate::commands::{failed, load_program};
use crate::domain::error::{ValidationError, WorkflowError};
use crate::domain::world::EndpointId;
use crate::output::json;

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Computer ID to deploy to
    pub computer: String,

    /// Program name; saved on the computer as <NAME>.lua
    #[arg(short, long)]
    pub name: String,

    /// Lua file to deploy (`-` reads stdin); prompts when omitted
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Run `ccdeploy run <COMPUTER> --name <NAME> [--file <PATH>]`.
///
/// The computer id is checked before the program is loaded or picked, and
/// every input is checked locally before anything reaches the server. The computer must then appear in the server's current list.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or JSON rendering fails.
pub async fn run(app: &AppContext, args: RunArgs, api: &impl WorldApi) -> Result<ExitCode> {
    let ui = app.notifier();
    let mut bench = Workbench::new();
    bench.program_name = args.name;

    let requested = EndpointId::from(args.computer.as_str());
    let computer = (!requested.as_str().is_empty()).then_some(&requested);
    if computer.is_none() {
        let err = ValidationError::NoComputerSelected;
        ui.alert(&err.to_string());
        return failed(app, &WorkflowError::from(err));
    }

    if let Err(err) = load_program(app, &mut bench, args.file.as_deref(), &ui).await? {
        return failed(app, &err);
    }

    if let Err(err) = deployer::prepare(computer, &bench.artifact, &bench.program_name) {
        ui.alert(&err.to_string());
        return failed(app, &WorkflowError::from(err));
    }

    if let Err(err) = bench.registry.refresh(api, &ui).await {
        return failed(app, &err);
    }
    if let Err(err) = bench.select(requested.as_str(), &ui) {
        return failed(app, &err);
    }

    match bench.run(api, &ui).await {
        Ok(message) => {
            if app.is_json() {
                json::print(&json!({
                    "computer_id": requested,
                    "message": message,
                }))?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => failed(app, &err),
    }
}
