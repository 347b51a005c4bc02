//! Dispatch metrics
//!
//! Counters kept by the registry so callers can see whether backends are
//! failing without the failures ever reaching them.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for registry activity
///
/// # Example
///
/// ```
/// use editor_plugin_log::DispatchMetrics;
///
/// let metrics = DispatchMetrics::new();
/// metrics.record_dispatched();
/// metrics.record_failure();
///
/// assert_eq!(metrics.dispatched(), 1);
/// assert_eq!(metrics.failures(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Messages broadcast through `dispatch`
    dispatched: AtomicU64,

    /// Individual backend failures (errors and panics) during broadcasts
    failures: AtomicU64,

    /// Backends shut down because another of the same kind was registered
    replaced: AtomicU64,
}

impl DispatchMetrics {
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            replaced: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn replaced(&self) -> u64 {
        self.replaced.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_replaced(&self) {
        self.replaced.fetch_add(1, Ordering::Relaxed);
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
        self.replaced.store(0, Ordering::Relaxed);
    }
}
