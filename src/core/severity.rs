//! Severity definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message severity.
///
/// Lower values are more important. A backend configured with threshold `N`
/// accepts every message whose severity is `<= N`, so `Debug` lets everything
/// through while `Error` only lets errors through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error = 0,
    #[default]
    Info = 1,
    Debug = 2,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Info, Severity::Debug];

    /// Name written inside the `[...]` token of a formatted line.
    pub fn display_name(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Info => "Info",
            Severity::Debug => "Debug",
        }
    }

    /// Numeric level as used by editor-side configuration.
    pub fn as_level(&self) -> i64 {
        *self as i64
    }

    /// Whether a backend configured at `self` should emit a message at `severity`.
    #[inline]
    pub fn admits(&self, severity: Severity) -> bool {
        severity <= *self
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::Error => Red,
            Severity::Info => Green,
            Severity::Debug => Blue,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl TryFrom<i64> for Severity {
    type Error = LoggerError;

    fn try_from(level: i64) -> Result<Self, LoggerError> {
        match level {
            0 => Ok(Severity::Error),
            1 => Ok(Severity::Info),
            2 => Ok(Severity::Debug),
            other => Err(LoggerError::InvalidSeverity(other)),
        }
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    /// Accepts display names (any case) or the numeric level.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "ERROR" => Ok(Severity::Error),
            "INFO" => Ok(Severity::Info),
            "DEBUG" => Ok(Severity::Debug),
            _ => {
                let level: i64 = trimmed.parse().map_err(|_| {
                    LoggerError::other(format!("Invalid severity: '{}'", s))
                })?;
                Severity::try_from(level)
            }
        }
    }
}
