//! Colored terminal output utilities.
//!
//! Status lines go to stderr; rendered documents (robots.txt, sitemap XML,
//! metadata JSON) go to stdout untouched so they can be piped or redirected.

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    status: Term,
    document: Term,
    label: Style,
    warn: Style,
    fail: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            status: Term::stderr(),
            document: Term::stdout(),
            label: Style::new().cyan().bold(),
            warn: Style::new().yellow(),
            fail: Style::new().red(),
        }
    }

    /// Print a plain status line.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.status.write_line(msg);
    }

    /// Print a `label: value` summary line with a highlighted label.
    pub(crate) fn field(&self, label: &str, value: &dyn std::fmt::Display) {
        let label = self.label.apply_to(format!("{label}:"));
        let _ = self.status.write_line(&format!("{label} {value}"));
    }

    /// Print a warning (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.status.write_line(&self.warn.apply_to(msg).to_string());
    }

    /// Print an error (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.status.write_line(&self.fail.apply_to(msg).to_string());
    }

    /// Write a rendered document to stdout as-is.
    pub(crate) fn document(&self, text: &str) -> std::io::Result<()> {
        self.document.write_str(text)?;
        self.document.flush()
    }
}
