//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::application::services::workbench::Workbench;
use crate::domain::config::DeployConfig;
use crate::domain::world::{EndpointId, ServerInfo};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("ccdeploy {version}");
    }

    /// Render the computer list, marking the selected one.
    pub fn render_computers(&self, ids: &[EndpointId], selected: Option<&EndpointId>) {
        if ids.is_empty() {
            if !self.ctx.quiet {
                println!("  No computers found. Place a computer in the world, then refresh.");
            }
            return;
        }
        self.ctx.header("Computers:");
        for id in ids {
            if Some(id) == selected {
                println!(
                    "  {} {}",
                    "●".style(self.ctx.styles.selected),
                    id.style(self.ctx.styles.selected)
                );
            } else {
                println!("    {id}");
            }
        }
    }

    /// Render the state of an interactive session.
    pub fn render_session(&self, bench: &Workbench) {
        let connection = &bench.connection;
        println!();
        match connection.session() {
            Some(session) => {
                self.ctx.kv("World:", &session.name);
                self.ctx.kv(
                    "ComputerCraft:",
                    if session.subsystem_installed {
                        "installed"
                    } else {
                        "not installed"
                    },
                );
                if let Some(max) = session.max_computer_id {
                    self.ctx.kv("Highest id:", &max.to_string());
                }
            }
            None => self.ctx.kv("World:", "(not connected)"),
        }
        if !connection.status().is_empty() {
            self.ctx.kv("Status:", connection.status());
        }
        if connection.provision_offered() {
            self.ctx.info("ComputerCraft is missing. Run: provision");
        }
        let selected = bench
            .registry
            .selected()
            .map_or_else(|| "(none)".to_string(), ToString::to_string);
        self.ctx.kv(
            "Computers:",
            &format!("{} listed, selected {selected}", bench.registry.ids().len()),
        );
        let name = if bench.program_name.trim().is_empty() {
            "(not set)"
        } else {
            bench.program_name.trim()
        };
        self.ctx.kv("Program:", name);
        self.ctx.kv(
            "Code:",
            &format!("{} lines", bench.artifact.code.lines().count()),
        );
        println!();
    }

    /// Render the loaded program code.
    pub fn render_code(&self, code: &str) {
        if code.trim().is_empty() {
            self.ctx.info("No code loaded. Run: load <path>");
            return;
        }
        for (n, line) in code.lines().enumerate() {
            println!("{:>4}  {line}", (n + 1).style(self.ctx.styles.dim));
        }
    }

    /// Render the current configuration.
    pub fn render_config(&self, config: &DeployConfig, path: &std::path::Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<20} {}", "server.url:", config.server.url);
        println!(
            "  {:<20} {}",
            "export.dir:",
            config.export.dir.as_deref().unwrap_or("(current directory)")
        );
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["CCDEPLOY_CONFIG", "CCDEPLOY_SERVER", "NO_COLOR"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }

    /// Render the server's platform diagnostics.
    pub fn render_server_info(&self, url: &str, info: &ServerInfo) {
        self.ctx.header(&format!("Server {url}"));
        self.ctx.kv("System:", &format!("{} {}", info.system, info.release));
        self.ctx.kv("Platform:", &info.platform);
        self.ctx.kv("OS name:", &info.os_name);
        self.ctx.kv("WSL:", if info.is_wsl { "yes" } else { "no" });
    }
}
