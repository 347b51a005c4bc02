//! Logging macros for ergonomic message formatting.
//!
//! Each macro formats its arguments like `format!` and broadcasts the result
//! through a [`LogRegistry`](crate::LogRegistry). Pass
//! `LogRegistry::global()` to reach the process-wide registry.
//!
//! # Examples
//!
//! ```
//! use editor_plugin_log::prelude::*;
//! use editor_plugin_log::info;
//!
//! let registry = LogRegistry::global();
//!
//! info!(registry, "Plugin loaded");
//!
//! let pid = 4242;
//! info!(registry, "Started process {}", pid);
//! ```

/// Log a message at an explicit severity.
///
/// # Examples
///
/// ```
/// # use editor_plugin_log::prelude::*;
/// # let registry = LogRegistry::new();
/// use editor_plugin_log::log;
/// log!(registry, Severity::Info, "Simple message");
/// log!(registry, Severity::Error, "Exit code: {}", 127);
/// ```
#[macro_export]
macro_rules! log {
    ($registry:expr, $severity:expr, $($arg:tt)+) => {
        $registry.dispatch(&format!($($arg)+), $severity)
    };
}

/// Log an error message.
///
/// # Examples
///
/// ```
/// # use editor_plugin_log::prelude::*;
/// # let registry = LogRegistry::new();
/// use editor_plugin_log::error;
/// error!(registry, "Process failed to start");
/// error!(registry, "Command '{}' exited with {}", "make", 2);
/// ```
#[macro_export]
macro_rules! error {
    ($registry:expr, $($arg:tt)+) => {
        $crate::log!($registry, $crate::Severity::Error, $($arg)+)
    };
}

/// Log an info message.
///
/// # Examples
///
/// ```
/// # use editor_plugin_log::prelude::*;
/// # let registry = LogRegistry::new();
/// use editor_plugin_log::info;
/// info!(registry, "Process window opened");
/// info!(registry, "{} processes running", 3);
/// ```
#[macro_export]
macro_rules! info {
    ($registry:expr, $($arg:tt)+) => {
        $crate::log!($registry, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a debug message.
///
/// # Examples
///
/// ```
/// # use editor_plugin_log::prelude::*;
/// # let registry = LogRegistry::new();
/// use editor_plugin_log::debug;
/// debug!(registry, "Polling process output");
/// debug!(registry, "Read {} bytes", 512);
/// ```
#[macro_export]
macro_rules! debug {
    ($registry:expr, $($arg:tt)+) => {
        $crate::log!($registry, $crate::Severity::Debug, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::backends::FileBackend;
    use crate::core::{LogRegistry, Severity};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_macros_respect_threshold() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("macros.log");

        let registry = LogRegistry::new();
        registry.register(FileBackend::new(&path, Severity::Info).unwrap());

        log!(registry, Severity::Info, "Formatted: {}", 42);
        error!(registry, "Code: {}", 500);
        info!(registry, "Info message");
        debug!(registry, "Hidden {}", "detail");

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("Formatted: 42"));
        assert!(lines[1].starts_with("- [ERROR]"));
        assert!(!content.contains("Hidden"));
    }
}
