//! `TerminalNotifier`: Presentation-layer implementation of `Notifier`.
//!
//! Wraps `&OutputContext` so application services can surface messages
//! without depending on any presentation type directly.
//!
//! - `status()` shows a spinner while the text ends in `...`, otherwise an info line
//! - `alert()` prints `"  ! {message}"` to stderr
//! - `notify()` prints a success/info/error line
//! - `modal()` prints a framed block to stderr and, on an interactive TTY,
//!   waits for a key press

use std::cell::RefCell;

use console::Term;
use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::{ModalNotice, Notifier, Severity};
use crate::output::OutputContext;
use crate::output::progress;

/// Hint printed with a modal that offers the settings affordance.
pub const SAVE_SETTINGS_HINT: &str =
    "Check the server address, then save it: ccdeploy config set server.url <URL>";

pub struct TerminalNotifier<'a> {
    ctx: &'a OutputContext,
    interactive: bool,
    spinner: RefCell<Option<ProgressBar>>,
}

impl<'a> TerminalNotifier<'a> {
    /// `interactive` enables waiting for dismissal of modals.
    #[must_use]
    pub fn new(ctx: &'a OutputContext, interactive: bool) -> Self {
        Self {
            ctx,
            interactive,
            spinner: RefCell::new(None),
        }
    }

    fn clear_spinner(&self) {
        if let Some(pb) = self.spinner.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }

    fn wait_for_dismissal(&self) {
        let term = Term::stderr();
        if !self.interactive || !term.is_term() {
            return;
        }
        eprintln!("  {}", "Press any key to dismiss".style(self.ctx.styles.dim));
        let _ = term.read_key();
    }
}

impl Notifier for TerminalNotifier<'_> {
    fn status(&self, text: &str) {
        self.clear_spinner();
        if progress::is_in_progress(text) && self.ctx.show_progress() {
            *self.spinner.borrow_mut() = Some(progress::spinner(text));
        } else {
            self.ctx.info(text);
        }
    }

    fn alert(&self, message: &str) {
        self.clear_spinner();
        self.ctx.alert(message);
    }

    fn notify(&self, severity: Severity, message: &str) {
        self.clear_spinner();
        match severity {
            Severity::Info => self.ctx.info(message),
            Severity::Success => self.ctx.success(message),
            Severity::Error => self.ctx.error(message),
        }
    }

    fn modal(&self, notice: &ModalNotice) {
        self.clear_spinner();
        let rule = "─".repeat(48);
        eprintln!();
        eprintln!("  {}", rule.style(self.ctx.styles.error));
        eprintln!(
            "  {} {}",
            "✗".style(self.ctx.styles.error),
            notice.message.style(self.ctx.styles.bold)
        );
        if notice.offer_save_settings {
            eprintln!("    {}", SAVE_SETTINGS_HINT.style(self.ctx.styles.dim));
        }
        eprintln!("  {}", rule.style(self.ctx.styles.error));
        self.wait_for_dismissal();
    }
}

impl Drop for TerminalNotifier<'_> {
    fn drop(&mut self) {
        self.clear_spinner();
    }
}
