//! No-op backend

use crate::core::{LoggerBackend, Result, Severity};

/// Backend that drops everything.
///
/// Useful as a placeholder before a real destination is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl NullBackend {
    pub fn new() -> Self {
        Self
    }
}

impl LoggerBackend for NullBackend {
    fn kind(&self) -> &str {
        "null"
    }

    fn threshold(&self) -> Severity {
        Severity::Error
    }

    fn log(&mut self, _message: &str, _severity: Severity) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_backend_accepts_calls() {
        let mut backend = NullBackend::new();
        assert!(backend.log("ignored", Severity::Error).is_ok());
        backend.shutdown();
        backend.shutdown();
        assert!(backend.log("still ignored", Severity::Debug).is_ok());
    }
}
