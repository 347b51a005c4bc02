//! Backend registry and dispatcher

use super::{backend::LoggerBackend, metrics::DispatchMetrics, severity::Severity};
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::OnceLock;

static GLOBAL: OnceLock<LogRegistry> = OnceLock::new();

/// Named collection of active backends.
///
/// Messages passed to [`dispatch`](LogRegistry::dispatch) are broadcast to
/// every registered backend, each of which applies its own threshold. Keys
/// are backend kinds, so registering a second backend of the same kind
/// shuts the first one down and replaces it.
///
/// # Example
///
/// ```
/// use editor_plugin_log::{LogRegistry, NullBackend, Severity};
///
/// let registry = LogRegistry::new();
/// registry.register(NullBackend::new());
/// registry.dispatch("plugin loaded", Severity::Info);
///
/// assert!(registry.unregister("null"));
/// assert!(registry.is_empty());
/// ```
pub struct LogRegistry {
    backends: Mutex<HashMap<String, Box<dyn LoggerBackend>>>,
    metrics: DispatchMetrics,
}

impl LogRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            backends: Mutex::new(HashMap::new()),
            metrics: DispatchMetrics::new(),
        }
    }

    /// Process-wide registry used by the free [`log`] functions and macros.
    pub fn global() -> &'static LogRegistry {
        GLOBAL.get_or_init(LogRegistry::new)
    }

    /// Broadcast a message to every backend.
    ///
    /// A backend that returns an error or panics is reported on stderr and
    /// skipped; the remaining backends still receive the message. Returns
    /// the number of backends that failed.
    pub fn dispatch(&self, message: &str, severity: Severity) -> usize {
        let mut backends = self.backends.lock();
        self.metrics.record_dispatched();

        let mut failed = 0;
        for (kind, backend) in backends.iter_mut() {
            let result = catch_unwind(AssertUnwindSafe(|| backend.log(message, severity)));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Backend '{}' failed: {}", kind, e);
                    failed += 1;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Backend '{}' panicked: {}. \
                         Other backends continue to function.",
                        kind,
                        panic_message(panic_info)
                    );
                    failed += 1;
                }
            }
        }

        for _ in 0..failed {
            self.metrics.record_failure();
        }
        failed
    }

    /// Register a backend under its kind.
    ///
    /// Any backend already registered under the same kind is shut down
    /// before the new one is inserted. Returns `true` if one was replaced.
    pub fn register<B: LoggerBackend + 'static>(&self, backend: B) -> bool {
        self.register_boxed(Box::new(backend))
    }

    pub fn register_boxed(&self, backend: Box<dyn LoggerBackend>) -> bool {
        let kind = backend.kind().to_string();
        let mut backends = self.backends.lock();

        let replaced = match backends.remove(&kind) {
            Some(mut old) => {
                shutdown_isolated(&kind, old.as_mut());
                self.metrics.record_replaced();
                true
            }
            None => false,
        };

        backends.insert(kind, backend);
        replaced
    }

    /// Shut down and remove the backend registered under `kind`.
    ///
    /// Returns `false` and prints a notice if no such backend exists.
    pub fn unregister(&self, kind: &str) -> bool {
        let removed = self.backends.lock().remove(kind);

        match removed {
            Some(mut backend) => {
                shutdown_isolated(kind, backend.as_mut());
                true
            }
            None => {
                println!("Failed to find logger {} in list of loggers", kind);
                false
            }
        }
    }

    /// Shut down every backend and leave the registry empty.
    pub fn shutdown_all(&self) {
        let mut backends = self.backends.lock();
        for (kind, mut backend) in backends.drain() {
            shutdown_isolated(&kind, backend.as_mut());
        }
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.backends.lock().contains_key(kind)
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self.backends.lock().keys().cloned().collect();
        kinds.sort();
        kinds
    }

    pub fn len(&self) -> usize {
        self.backends.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.lock().is_empty()
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }
}

impl Default for LogRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LogRegistry {
    fn drop(&mut self) {
        self.shutdown_all();
    }
}

fn shutdown_isolated(kind: &str, backend: &mut dyn LoggerBackend) {
    if let Err(panic_info) = catch_unwind(AssertUnwindSafe(|| backend.shutdown())) {
        eprintln!(
            "[LOGGER CRITICAL] Backend '{}' panicked during shutdown: {}",
            kind,
            panic_message(panic_info)
        );
    }
}

fn panic_message(panic_info: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Log an `Info` message through the global registry.
pub fn log(message: impl AsRef<str>) {
    log_at(Severity::Info, message);
}

/// Log a message at `severity` through the global registry.
pub fn log_at(severity: Severity, message: impl AsRef<str>) {
    LogRegistry::global().dispatch(message.as_ref(), severity);
}

/// Shut down every backend in the global registry.
pub fn shutdown() {
    LogRegistry::global().shutdown_all();
}
