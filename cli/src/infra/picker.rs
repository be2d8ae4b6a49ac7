//! Terminal file picker: implements `FilePicker` with a `dialoguer` prompt.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::Term;

use crate::application::ports::FilePicker;

/// Prompts for a path on the terminal.
///
/// Without a TTY, or when prompts are disabled, nothing is chosen.
pub struct PromptPicker {
    pub interactive: bool,
}

impl FilePicker for PromptPicker {
    fn pick(&self, extensions: &[&str]) -> Result<Option<PathBuf>> {
        if !self.interactive || !Term::stderr().is_term() {
            return Ok(None);
        }
        let accepted = extensions
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(", ");
        let input: String = dialoguer::Input::new()
            .with_prompt(format!("File to load ({accepted}; empty to cancel)"))
            .allow_empty(true)
            .interact_text()
            .context("reading file path")?;
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        Ok(Some(expand_home(input)))
    }
}

/// Expand a leading `~/` to the home directory.
#[must_use]
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
