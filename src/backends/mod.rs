//! Backend implementations

#[cfg(feature = "console")]
pub mod console;
pub mod file;
pub mod null;

#[cfg(feature = "console")]
pub use console::ConsoleBackend;
pub use file::{expand_home, FileBackend};
pub use null::NullBackend;

pub use crate::core::LoggerBackend;
