//! `ccdeploy session`: interactive workbench.
//!
//! Reads one command per line, from a prompt on a terminal or from piped
//! stdin, and runs it to completion against a single [`Workbench`] before
//! reading the next.

use std::ffi::OsString;
use std::io::IsTerminal as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt as _, BufReader, Stdin};

use crate::app::AppContext;
use crate::application::ports::{Notifier, WorldApi};
use crate::application::services::connection::ConnectOutcome;
use crate::application::services::workbench::Workbench;
use crate::domain::artifact::ExportFormat;
use crate::infra::clipboard::Osc52Clipboard;
use crate::infra::fs::LocalFs;
use crate::output::TerminalNotifier;

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    /// Connect to this world on start
    pub world: Option<String>,

    /// Initial program name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Program to load on start
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Parser)]
#[command(
    name = "session",
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true,
    color = clap::ColorChoice::Never,
    help_template = "Commands:\n{subcommands}"
)]
struct Line {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Connect to a world (default: the last world name)
    Connect {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        world: Vec<String>,
    },
    /// Create the ComputerCraft folders in the current world
    Provision,
    /// Fetch the computer list again
    Refresh,
    /// Show the computer list
    Computers,
    /// Select the computer to deploy to
    Select { id: Option<String> },
    /// Set the program name
    Name {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        program: Vec<String>,
    },
    /// Load a .lua or .txt file (prompts when no path is given)
    Load {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        path: Vec<OsString>,
    },
    /// Print the loaded code
    Show,
    /// Discard the loaded code
    Clear,
    /// Save the code as txt or lua
    Export {
        format: ExportFormat,
        dir: Option<PathBuf>,
    },
    /// Copy the code to the clipboard
    Copy,
    /// Deploy the code to the selected computer and run it
    Run,
    /// Show the session state
    Status,
    /// List commands
    Help,
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

enum Step {
    Done,
    Failed,
    Quit,
}

enum LineSource {
    Prompt,
    Piped(tokio::io::Lines<BufReader<Stdin>>),
}

impl LineSource {
    fn detect() -> Self {
        if std::io::stdin().is_terminal() {
            Self::Prompt
        } else {
            Self::Piped(BufReader::new(tokio::io::stdin()).lines())
        }
    }

    fn is_prompt(&self) -> bool {
        matches!(self, Self::Prompt)
    }

    async fn next_line(&mut self) -> Result<Option<String>> {
        match self {
            Self::Prompt => {
                let input = dialoguer::Input::<String>::new()
                    .with_prompt("ccdeploy")
                    .allow_empty(true)
                    .interact_text();
                match input {
                    Ok(line) => Ok(Some(line)),
                    Err(dialoguer::Error::IO(e))
                        if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                    {
                        Ok(None)
                    }
                    Err(e) => Err(e).context("reading command"),
                }
            }
            Self::Piped(lines) => lines.next_line().await.context("reading command"),
        }
    }
}

/// Run `ccdeploy session [WORLD]`.
///
/// With piped input the exit code is a failure when any command failed.
///
/// # Errors
///
/// Returns an error if input cannot be read.
pub async fn run(app: &AppContext, args: SessionArgs, api: &impl WorldApi) -> Result<ExitCode> {
    let mut source = LineSource::detect();
    let ui = TerminalNotifier::new(&app.output, source.is_prompt() && !app.non_interactive);
    let mut bench = Workbench::new();
    let mut failures = 0_usize;

    if let Some(name) = args.name {
        bench.program_name = name;
    }
    if let Some(path) = args.file {
        let action = Action::Load {
            path: vec![path.into_os_string()],
        };
        if let Step::Failed = dispatch(app, &mut bench, action, api, &ui).await {
            failures += 1;
        }
    }
    if let Some(world) = args.world {
        let action = Action::Connect { world: vec![world] };
        if let Step::Failed = dispatch(app, &mut bench, action, api, &ui).await {
            failures += 1;
        }
    }

    if source.is_prompt() {
        app.output
            .info("Type 'help' for a list of commands, 'quit' to leave.");
    }

    while let Some(raw) = source.next_line().await? {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        tracing::debug!(line, "session command");
        let action = match Line::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => keep_operand(parsed.action, line),
            Err(err) => {
                ui.alert(&describe_parse_error(&err, line));
                failures += 1;
                continue;
            }
        };
        match dispatch(app, &mut bench, action, api, &ui).await {
            Step::Done => {}
            Step::Failed => failures += 1,
            Step::Quit => break,
        }
    }

    if failures > 0 && !source.is_prompt() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Everything after the command word, with inner whitespace left as typed.
fn operand(line: &str) -> &str {
    line.trim()
        .split_once(char::is_whitespace)
        .map_or("", |(_, rest)| rest.trim())
}

/// Replace the tokenized free-text argument of `connect`, `name` and `load`
/// with the operand exactly as it was written on the line.
fn keep_operand(action: Action, line: &str) -> Action {
    let rest = operand(line);
    match action {
        Action::Connect { .. } => Action::Connect {
            world: one_or_none(rest).map(String::from).into_iter().collect(),
        },
        Action::Name { .. } => Action::Name {
            program: one_or_none(rest).map(String::from).into_iter().collect(),
        },
        Action::Load { .. } => Action::Load {
            path: one_or_none(rest).map(OsString::from).into_iter().collect(),
        },
        other => other,
    }
}

fn one_or_none(rest: &str) -> Option<&str> {
    (!rest.is_empty()).then_some(rest)
}

fn describe_parse_error(err: &clap::Error, line: &str) -> String {
    if err.kind() == clap::error::ErrorKind::InvalidSubcommand {
        let word = line.split_whitespace().next().unwrap_or(line);
        return format!("Unknown command '{word}'. Type 'help' for a list of commands.");
    }
    let text = err.to_string();
    text.lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string()
}

fn step<T, E>(result: Result<T, E>) -> Step {
    if result.is_ok() { Step::Done } else { Step::Failed }
}

async fn dispatch(
    app: &AppContext,
    bench: &mut Workbench,
    action: Action,
    api: &impl WorldApi,
    ui: &impl Notifier,
) -> Step {
    let out = &app.output;
    match action {
        Action::Connect { world } => {
            let world = (!world.is_empty()).then(|| world.join(" "));
            match bench.connect(world.as_deref(), api, ui).await {
                Ok(ConnectOutcome::Ready { computers: Some(_) }) => {
                    app.renderer()
                        .render_computers(bench.registry.ids(), bench.registry.selected());
                    Step::Done
                }
                Ok(ConnectOutcome::Ready { computers: None }) => Step::Failed,
                Ok(ConnectOutcome::NeedsProvisioning) => {
                    out.info("ComputerCraft is not installed in this world. Run: provision");
                    Step::Done
                }
                Err(_) => Step::Failed,
            }
        }
        Action::Provision => match bench.provision(api, ui).await {
            Ok(Some(_)) => {
                app.renderer().render_computers(bench.registry.ids(), None);
                Step::Done
            }
            Ok(None) | Err(_) => Step::Failed,
        },
        Action::Refresh => {
            let result = bench.refresh(api, ui).await;
            if result.is_ok() {
                app.renderer().render_computers(bench.registry.ids(), None);
            }
            step(result)
        }
        Action::Computers => {
            app.renderer()
                .render_computers(bench.registry.ids(), bench.registry.selected());
            Step::Done
        }
        Action::Select { id } => {
            let result = bench.select(id.as_deref().unwrap_or_default(), ui);
            if let Ok(id) = &result {
                out.success(&format!("Selected computer {id}"));
            }
            step(result)
        }
        Action::Name { program } => {
            bench.program_name = program.join(" ");
            if bench.program_name.is_empty() {
                out.info("Program name cleared.");
            } else {
                out.success(&format!("Program name: {}", bench.program_name));
            }
            Step::Done
        }
        Action::Load { path } => {
            let path = path.into_iter().next().map(PathBuf::from);
            let result = bench.import(path.as_deref(), &app.picker(), &LocalFs, ui);
            if let Ok(Some(path)) = &result {
                out.success(&format!(
                    "Loaded {} ({} lines)",
                    path.display(),
                    bench.artifact.code.lines().count()
                ));
            }
            step(result)
        }
        Action::Show => {
            app.renderer().render_code(&bench.artifact.code);
            Step::Done
        }
        Action::Clear => {
            bench.artifact.replace(String::new());
            out.info("Code cleared.");
            Step::Done
        }
        Action::Export { format, dir } => {
            let dir = app.export_dir(dir.as_deref());
            step(bench.export(format, &dir, &LocalFs, ui))
        }
        Action::Copy => step(bench.copy(&Osc52Clipboard, ui)),
        Action::Run => step(bench.run(api, ui).await),
        Action::Status => {
            app.renderer().render_session(bench);
            Step::Done
        }
        Action::Help => {
            println!("{}", Line::command().render_help());
            Step::Done
        }
        Action::Quit => Step::Quit,
    }
}
