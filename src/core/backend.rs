//! Backend trait for log output destinations

use super::{error::Result, severity::Severity};

/// A destination that receives broadcast messages from the registry.
///
/// Each backend filters on its own threshold: [`log`](LoggerBackend::log)
/// with a severity the threshold does not admit must return `Ok(())`
/// without side effects.
pub trait LoggerBackend: Send {
    /// Registry key. At most one backend per kind is active at a time.
    fn kind(&self) -> &str;

    fn threshold(&self) -> Severity;

    fn log(&mut self, message: &str, severity: Severity) -> Result<()>;

    /// Release held resources. Must be safe to call any number of times.
    fn shutdown(&mut self) {}

    #[inline]
    fn accepts(&self, severity: Severity) -> bool {
        self.threshold().admits(severity)
    }
}
