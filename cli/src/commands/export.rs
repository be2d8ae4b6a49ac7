//! `ccdeploy export`: save a program locally as `.lua` or `.txt`.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::app::AppContext;
use crate::application::services::workbench::Workbench;
use crate::commands::{failed, load_program};
use crate::domain::artifact::ExportFormat;
use crate::infra::fs::LocalFs;
use crate::output::json;

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Output format: lua or txt
    #[arg(short = 'F', long, default_value = "lua")]
    pub format: ExportFormat,

    /// Base file name; unsafe characters become `_`
    #[arg(short, long)]
    pub name: String,

    /// Program to export (`-` reads stdin); prompts when omitted
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output directory (default: export.dir, else the current directory)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Run `ccdeploy export`.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or JSON rendering fails.
pub async fn run(app: &AppContext, args: ExportArgs) -> Result<ExitCode> {
    let ui = app.notifier();
    let mut bench = Workbench::new();
    bench.program_name = args.name;

    if let Err(err) = load_program(app, &mut bench, args.file.as_deref(), &ui).await? {
        return failed(app, &err);
    }

    let dir = app.export_dir(args.out.as_deref());
    match bench.export(args.format, &dir, &LocalFs, &ui) {
        Ok(path) => {
            if app.is_json() {
                json::print(&json!({ "path": path, "format": args.format.to_string() }))?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => failed(app, &err),
    }
}
