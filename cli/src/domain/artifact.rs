//! Program artifact and filename derivation.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::fmt;

use crate::domain::error::ValidationError;

/// MIME type every exported artifact is tagged with.
pub const ARTIFACT_MIME: &str = "text/plain";

/// Extensions accepted by import.
pub const IMPORTABLE_EXTENSIONS: &[&str] = &["lua", "txt"];

/// The in-memory program text.
///
/// `code` is the single source of truth; the filename is re-derived from the
/// program-name input by every operation that needs one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramArtifact {
    pub code: String,
}

impl ProgramArtifact {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// Code with surrounding whitespace removed, or `None` when nothing is left.
    #[must_use]
    pub fn trimmed_code(&self) -> Option<&str> {
        let code = self.code.trim();
        (!code.is_empty()).then_some(code)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trimmed_code().is_none()
    }

    /// Replace the code with imported or edited text, verbatim.
    pub fn replace(&mut self, code: String) {
        self.code = code;
    }
}

/// Export flavour; decides the appended extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Lua,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Lua => "lua",
        }
    }

    pub(crate) fn empty_code_error(self) -> ValidationError {
        match self {
            Self::Text => ValidationError::NoCodeToExportText,
            Self::Lua => ValidationError::NoCodeToExportLua,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Text),
            "lua" => Ok(Self::Lua),
            other => Err(format!("unknown export format '{other}' (expected txt or lua)")),
        }
    }
}

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
#[must_use]
pub fn sanitize_file_name(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Trim the program-name input and sanitize it into a base name.
///
/// # Errors
///
/// Returns [`ValidationError::MissingProgramName`] when the input is blank.
pub fn base_name(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingProgramName);
    }
    Ok(sanitize_file_name(trimmed))
}

/// Derive `<sanitized base>.<ext>` from the program-name input.
///
/// # Errors
///
/// Returns [`ValidationError::MissingProgramName`] when the input is blank.
pub fn derive_file_name(input: &str, extension: &str) -> Result<String, ValidationError> {
    Ok(format!("{}.{extension}", base_name(input)?))
}

/// Check that a path chosen for import has an accepted extension.
///
/// # Errors
///
/// Returns [`ValidationError::UnsupportedFileType`] for anything but `.lua` / `.txt`.
pub fn check_importable(path: &std::path::Path) -> Result<(), ValidationError> {
    let ok = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMPORTABLE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        });
    if ok {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedFileType(
            path.display().to_string(),
        ))
    }
}
