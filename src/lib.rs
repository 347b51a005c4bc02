//! # Editor Plugin Log
//!
//! In-process logging and settings facility for editor plugins.
//!
//! ## Features
//!
//! - **Pluggable Backends**: File, console, and no-op backends behind one trait
//! - **Per-Backend Filtering**: Each backend applies its own severity threshold
//! - **Lazy Output**: Files are created on the first message they accept
//! - **Failure Isolation**: One broken backend never stops delivery to the rest
//! - **Settings Snapshot**: Editor options loaded once and reloadable on demand

pub mod backends;
pub mod core;
pub mod macros;
pub mod settings;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::backends::ConsoleBackend;
    pub use crate::backends::{FileBackend, NullBackend};
    pub use crate::core::{
        format, log, log_at, shutdown, DispatchMetrics, LogRegistry, LoggerBackend, LoggerError,
        Result, Severity,
    };
    pub use crate::settings::{Settings, SettingsSource, SettingsStore};
}

#[cfg(feature = "console")]
pub use crate::backends::ConsoleBackend;
pub use crate::backends::{FileBackend, NullBackend};
pub use crate::core::{
    format, format_at, log, log_at, parse_level, shutdown, DispatchMetrics, LogRegistry,
    LoggerBackend, LoggerError, Result, Severity, TIMESTAMP_FORMAT,
};
pub use crate::settings::{FnSource, Settings, SettingsSource, SettingsStore, MIN_CHECK_INTERVAL_MS};
