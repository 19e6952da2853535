use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic request/error counters for one crawl run
///
/// Threaded through the client instead of living in process-global state,
/// so parallel runs (and tests) stay isolated.
#[derive(Debug, Default)]
pub struct RunCounters {
    requests: AtomicU64,
    errors: AtomicU64,
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub requests: u64,
    pub errors: u64,
}

impl RunCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one API call attempt
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one failed API call
    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}
