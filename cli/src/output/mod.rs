//! Terminal output for ccdeploy.
//!
//! Progress and results go to stdout and are silenced by `--quiet`/`--json`.
//! Alerts and errors go to stderr and are always shown. Messages relayed from
//! the world server can span several lines; continuation lines are indented
//! under the first so they stay attached to their mark.

pub mod human;
pub mod json;
pub mod notifier;
pub mod progress;
pub mod styles;

use console::Term;
use owo_colors::{OwoColorize as _, Style};
pub use human::HumanRenderer;
pub use notifier::TerminalNotifier;
pub use styles::Styles;

pub struct OutputContext {
    pub styles: Styles,
    pub quiet: bool,
    stdout_tty: bool,
}

impl OutputContext {
    /// Colors are on only for a terminal stdout, and never with `--no-color`,
    /// `NO_COLOR` or `TERM=dumb`.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let stdout_tty = Term::stdout().is_term();
        let dumb = std::env::var("TERM").is_ok_and(|t| t == "dumb");
        let use_colors = !no_color && stdout_tty && !dumb && std::env::var_os("NO_COLOR").is_none();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }
        Self {
            styles,
            quiet,
            stdout_tty,
        }
    }

    /// Spinners only make sense on a terminal that is not silenced.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.stdout_tty && !self.quiet
    }

    pub fn success(&self, msg: &str) {
        self.out("✓", self.styles.success, msg);
    }

    pub fn info(&self, msg: &str) {
        self.out("ℹ", self.styles.info, msg);
    }

    /// A rejected input such as a blank world name or no selected computer.
    pub fn alert(&self, msg: &str) {
        eprintln!("{}", marked_line(&"!".style(self.styles.warning).to_string(), msg));
    }

    pub fn error(&self, msg: &str) {
        eprintln!("{}", marked_line(&"✗".style(self.styles.error).to_string(), msg));
    }

    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }

    fn out(&self, mark: &str, style: Style, msg: &str) {
        if !self.quiet {
            println!("{}", marked_line(&mark.style(style).to_string(), msg));
        }
    }
}

/// `  <mark> <first line>` with later lines indented to the message column.
fn marked_line(mark: &str, msg: &str) -> String {
    let mut lines = msg.trim_end().lines();
    let mut text = format!("  {mark} {}", lines.next().unwrap_or_default());
    for line in lines {
        text.push_str("\n    ");
        text.push_str(line);
    }
    text
}
