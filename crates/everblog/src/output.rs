//! Status output on stderr.
//!
//! Rendered HTML may go to stdout, so everything meant for the user is
//! written to stderr.

use console::{Style, Term};

/// Width of the right-aligned status label.
const LABEL_WIDTH: usize = 10;

/// Styled stderr reporter.
pub(crate) struct Output {
    term: Term,
    quiet: bool,
    label: Style,
    warn: Style,
    fail: Style,
}

impl Output {
    /// Create a reporter. A quiet reporter only prints warnings and errors.
    #[must_use]
    pub(crate) fn new(quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            quiet,
            label: Style::new().green().bold(),
            warn: Style::new().yellow(),
            fail: Style::new().red().bold(),
        }
    }

    /// Print a status line such as `  Rendered note.enml`.
    pub(crate) fn status(&self, label: &str, msg: &str) {
        if self.quiet {
            return;
        }
        let label = format!("{label:>LABEL_WIDTH$}");
        let _ = self
            .term
            .write_line(&format!("{} {msg}", self.label.apply_to(label)));
    }

    /// Print a warning (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self
            .term
            .write_line(&self.warn.apply_to(format!("warning: {msg}")).to_string());
    }

    /// Print an error (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self
            .term
            .write_line(&self.fail.apply_to(format!("error: {msg}")).to_string());
    }
}
