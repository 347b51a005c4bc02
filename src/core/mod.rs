//! Core logging types and traits

pub mod backend;
pub mod error;
pub mod format;
pub mod metrics;
pub mod registry;
pub mod severity;

pub use backend::LoggerBackend;
pub use error::{LoggerError, Result};
pub use format::{format, format_at, parse_level, TIMESTAMP_FORMAT};
pub use metrics::DispatchMetrics;
pub use registry::{log, log_at, shutdown, LogRegistry};
pub use severity::Severity;
