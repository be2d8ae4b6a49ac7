//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Validation errors ─────────────────────────────────────────────────────────

/// Missing or malformed user input, detected before any I/O happens.
///
/// The `Display` text is the exact message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a world name.")]
    MissingWorldName,

    #[error("Please select a Computer ID.")]
    NoComputerSelected,

    #[error("Computer ID \"{0}\" is not in the current list. Run 'refresh' first.")]
    UnknownComputer(String),

    #[error("Please enter a program name.")]
    MissingProgramName,

    #[error("No Lua code generated to run.")]
    NoCodeToRun,

    #[error("No code to download.")]
    NoCodeToExportText,

    #[error("No Lua code generated to download.")]
    NoCodeToExportLua,

    #[error("No code to copy.")]
    NoCodeToCopy,

    #[error("Only .lua and .txt files can be loaded: {0}")]
    UnsupportedFileType(String),
}

// ── Remote API errors ─────────────────────────────────────────────────────────

/// Outcome of a failed call against the world server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("server returned HTTP {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    /// The request never produced a usable response.
    #[error("transport failure: {0}")]
    Transport(String),
}

// ── Workflow errors ───────────────────────────────────────────────────────────

/// Terminal failure of a single user action.
///
/// Every variant has already been surfaced through the notifier by the time
/// the service returns it; callers only need to decide the exit status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Remote(String),

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Local(String),
}

impl WorkflowError {
    /// Map an [`ApiError`] to the message users see.
    ///
    /// A rejection carrying a `message` shows it verbatim; everything else
    /// falls back to the operation-specific `generic` text.
    #[must_use]
    pub fn from_api(err: ApiError, generic: &str) -> Self {
        match err {
            ApiError::Rejected {
                message: Some(message),
                ..
            } => Self::Remote(message),
            ApiError::Rejected { message: None, .. } => Self::Remote(generic.to_string()),
            ApiError::Transport(_) => Self::Transport(generic.to_string()),
        }
    }

    /// Short machine-readable code used by `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Remote(_) => "remote",
            Self::Transport(_) => "transport",
            Self::Local(_) => "local",
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{hint}")]
    InvalidValue {
        key: String,
        value: String,
        hint: String,
    },
}
