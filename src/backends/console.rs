//! Console backend implementation

use crate::core::{format, LoggerBackend, Result, Severity};
use colored::Colorize;
use std::io::Write;

/// Writes formatted lines to stderr.
///
/// Stdout is left alone because editor hosts often use it as a channel to
/// the plugin.
pub struct ConsoleBackend {
    threshold: Severity,
    use_colors: bool,
}

impl ConsoleBackend {
    pub fn new(threshold: Severity) -> Self {
        Self {
            threshold,
            use_colors: true,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn render(&self, message: &str, severity: Severity) -> String {
        let line = format(message, severity);
        if !self.use_colors {
            return line;
        }

        // Only the level token is colored; the rest stays greppable.
        let token = format!("[{}]", severity.display_name());
        line.replacen(
            &token,
            &token.color(severity.color_code()).to_string(),
            1,
        )
    }
}

impl LoggerBackend for ConsoleBackend {
    fn kind(&self) -> &str {
        "console"
    }

    fn threshold(&self) -> Severity {
        self.threshold
    }

    fn log(&mut self, message: &str, severity: Severity) -> Result<()> {
        if !self.accepts(severity) {
            return Ok(());
        }

        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{}", self.render(message, severity))?;
        stderr.flush()?;
        Ok(())
    }

    fn shutdown(&mut self) {
        let _ = std::io::stderr().flush();
    }
}
