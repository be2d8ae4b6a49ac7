//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;
use crate::domain::config::validate_server_url;

/// Deploy Lua programs to ComputerCraft computers in a Minecraft world
#[derive(Parser)]
#[command(
    name = "ccdeploy",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Skip prompts and use defaults
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Log diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// World server URL (overrides server.url)
    #[arg(long, global = true, env = "CCDEPLOY_SERVER", value_parser = parse_server_url)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Connect to a world and list its computers
    Connect(commands::connect::ConnectArgs),

    /// Create the ComputerCraft folders in a world
    Provision(commands::provision::ProvisionArgs),

    /// List the computers of the connected world
    Computers,

    /// Deploy a program to a computer and run it
    Run(commands::run::RunArgs),

    /// Save a program as .lua or .txt
    Export(commands::export::ExportArgs),

    /// Copy a program to the clipboard
    Copy(commands::copy::CopyArgs),

    /// Show the world server's platform
    Info,

    /// Interactive session: connect, select, load and run
    Session(commands::session::SessionArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails in a way not already shown to
    /// the user.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            verbose: _,
            server,
            command,
        } = self;

        if let Command::Version = command {
            commands::version::run(json, quiet);
            return Ok(ExitCode::SUCCESS);
        }

        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes, server },
        })?;

        match command {
            Command::Connect(args) => {
                commands::connect::run(&app, &args, &app.world_api()?).await
            }
            Command::Provision(args) => {
                commands::provision::run(&app, &args, &app.world_api()?).await
            }
            Command::Computers => commands::computers::run(&app, &app.world_api()?).await,
            Command::Run(args) => commands::run::run(&app, args, &app.world_api()?).await,
            Command::Export(args) => commands::export::run(&app, args).await,
            Command::Copy(args) => commands::copy::run(&app, args).await,
            Command::Info => commands::info::run(&app, &app.world_api()?).await,
            Command::Session(args) => {
                commands::session::run(&app, args, &app.world_api()?).await
            }
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => unreachable!("handled above"),
        }
    }
}

fn parse_server_url(value: &str) -> Result<String, String> {
    validate_server_url(value).map_err(|e| e.to_string())?;
    Ok(value.trim_end_matches('/').to_string())
}
