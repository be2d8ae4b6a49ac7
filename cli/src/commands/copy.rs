//! `ccdeploy copy`: put a program on the clipboard.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::workbench::Workbench;
use crate::commands::{failed, load_program};
use crate::infra::clipboard::Osc52Clipboard;

/// Arguments for the copy command.
#[derive(Args)]
pub struct CopyArgs {
    /// Program to copy (`-` reads stdin); prompts when omitted
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Run `ccdeploy copy`.
///
/// # Errors
///
/// Returns an error if stdin cannot be read.
pub async fn run(app: &AppContext, args: CopyArgs) -> Result<ExitCode> {
    let ui = app.notifier();
    let mut bench = Workbench::new();

    if let Err(err) = load_program(app, &mut bench, args.file.as_deref(), &ui).await? {
        return failed(app, &err);
    }
    match bench.copy(&Osc52Clipboard, &ui) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => failed(app, &err),
    }
}
