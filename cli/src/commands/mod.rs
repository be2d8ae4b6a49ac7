//! Command implementations

pub mod computers;
pub mod config;
pub mod connect;
pub mod copy;
pub mod export;
pub mod info;
pub mod provision;
pub mod run;
pub mod session;
pub mod version;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt as _;

use crate::app::AppContext;
use crate::application::ports::Notifier;
use crate::application::services::workbench::Workbench;
use crate::domain::error::WorkflowError;
use crate::infra::fs::LocalFs;
use crate::output::json;

/// Path argument meaning "read the program from stdin".
pub const STDIN_PATH: &str = "-";

/// Exit status for a workflow failure the services have already shown.
///
/// In JSON mode the failure is repeated on stdout as an error document.
pub(crate) fn failed(app: &AppContext, err: &WorkflowError) -> Result<ExitCode> {
    tracing::debug!(code = err.code(), error = %err, "command failed");
    if app.is_json() {
        println!("{}", json::format_error(&err.to_string(), err.code())?);
    }
    Ok(ExitCode::FAILURE)
}

/// Fill the workbench's artifact from `file`, stdin (`-`) or the picker.
///
/// The outer error is an I/O failure on stdin; the inner one has already
/// been shown to the user.
pub(crate) async fn load_program(
    app: &AppContext,
    bench: &mut Workbench,
    file: Option<&Path>,
    ui: &impl Notifier,
) -> Result<Result<Option<PathBuf>, WorkflowError>> {
    if file.is_some_and(|f| f == Path::new(STDIN_PATH)) {
        let mut code = String::new();
        tokio::io::stdin()
            .read_to_string(&mut code)
            .await
            .context("reading program from stdin")?;
        bench.artifact.replace(code);
        return Ok(Ok(None));
    }
    Ok(bench.import(file, &app.picker(), &LocalFs, ui))
}
