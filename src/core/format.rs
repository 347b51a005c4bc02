//! Line formatting
//!
//! Every backend writes the same single-line shape:
//!
//! ```text
//! - [Info] {Mon 19 2026 14:03:22} message text
//! ```
//!
//! The timestamp is local wall-clock time taken when the line is formatted.

use super::severity::Severity;
use chrono::{DateTime, Local, TimeZone};

/// strftime pattern for the `{...}` timestamp: weekday, day, year, time.
pub const TIMESTAMP_FORMAT: &str = "%a %d %Y %H:%M:%S";

/// Format a message using the current local time.
///
/// # Examples
///
/// ```
/// use editor_plugin_log::{format, Severity};
///
/// let line = format("hello", Severity::Info);
/// assert!(line.starts_with("- [Info] {"));
/// assert!(line.ends_with("} hello"));
/// ```
#[must_use]
pub fn format(message: &str, severity: Severity) -> String {
    format_at(message, severity, &Local::now())
}

/// Format a message with an explicit timestamp.
#[must_use]
pub fn format_at<Tz>(message: &str, severity: Severity, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "- [{}] {{{}}} {}",
        severity.display_name(),
        at.format(TIMESTAMP_FORMAT),
        sanitize(message)
    )
}

/// Recover the severity from a line produced by [`format`].
pub fn parse_level(line: &str) -> Option<Severity> {
    let rest = line.strip_prefix("- [")?;
    let end = rest.find(']')?;
    let token = &rest[..end];
    Severity::ALL
        .into_iter()
        .find(|s| s.display_name() == token)
}

// One call must stay one line in the output file.
fn sanitize(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
