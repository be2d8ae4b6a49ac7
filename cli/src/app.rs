//! Application context: unified state passed to every command handler.
//!
//! Built once in `Cli::run()` from the top-level flags and the config file.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::application::services::config_service;
use crate::domain::config::DeployConfig;
use crate::infra::config::YamlConfigStore;
use crate::infra::http::HttpWorldApi;
use crate::infra::picker::PromptPicker;
use crate::output::{HumanRenderer, OutputContext, TerminalNotifier};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `CCDEPLOY_YES` env vars).
    pub yes: bool,
    /// Server URL overriding `server.url` for this invocation.
    pub server: Option<String>,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Configuration file store.
    pub config_store: YamlConfigStore,
    /// Configuration loaded at startup.
    pub config: DeployConfig,
    /// World server base URL after applying `--server`.
    pub server_url: String,
    /// When `true`, skip interactive prompts and use defaults.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("CCDEPLOY_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let config_store = YamlConfigStore;
        let config = config_service::load_config(&config_store)?;
        let server_url =
            config_service::resolve_server_url(&config, flags.behaviour.server.as_deref());
        tracing::debug!(%server_url, config = %config_store.path()?.display(), "context ready");

        Ok(Self {
            // JSON mode keeps stdout clean for the document.
            output: OutputContext::new(
                flags.output.no_color,
                flags.output.quiet || flags.output.json,
            ),
            mode,
            config_store,
            config,
            server_url,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    #[must_use]
    pub fn renderer(&self) -> HumanRenderer<'_> {
        HumanRenderer::new(&self.output)
    }

    /// Terminal notifier; modals wait for dismissal unless prompts are off.
    #[must_use]
    pub fn notifier(&self) -> TerminalNotifier<'_> {
        TerminalNotifier::new(&self.output, !self.non_interactive)
    }

    /// HTTP client for the configured world server.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn world_api(&self) -> Result<HttpWorldApi> {
        HttpWorldApi::new(&self.server_url)
    }

    #[must_use]
    pub fn picker(&self) -> PromptPicker {
        PromptPicker {
            interactive: !self.non_interactive,
        }
    }

    /// Directory exports go to: the explicit override, else `export.dir`,
    /// else the current directory.
    #[must_use]
    pub fn export_dir(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.config.export.dir.as_deref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `CCDEPLOY_YES` env),
    /// returns `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
