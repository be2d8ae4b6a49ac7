//! Terminal clipboard: implements `Clipboard` with the OSC 52 escape sequence.

use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use console::Term;

use crate::application::ports::Clipboard;

/// Writes the system clipboard through the terminal emulator.
///
/// Fails when stdout is not a terminal; whether the emulator honours the
/// sequence cannot be observed.
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let term = Term::stdout();
        anyhow::ensure!(
            term.is_term(),
            "clipboard unavailable: stdout is not a terminal"
        );
        term.write_str(&osc52_sequence(text))
            .context("writing clipboard escape sequence")?;
        term.flush().context("flushing terminal")
    }
}

/// Build the OSC 52 "set clipboard" sequence for `text`.
#[must_use]
pub fn osc52_sequence(text: &str) -> String {
    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}
