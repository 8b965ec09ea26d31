use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Minimal counters for throttle visibility. Cloning shares the counters.
#[derive(Clone, Debug, Default)]
pub struct ThrottleCounters {
    pub allowed: Arc<AtomicU64>,
    pub suppressed: Arc<AtomicU64>,

    // lock not acquired in time; allowed anyway
    pub fail_open: Arc<AtomicU64>,
}

/// Point-in-time copy of [`ThrottleCounters`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThrottleStats {
    pub allowed: u64,
    pub suppressed: u64,
    pub fail_open: u64,
}

impl ThrottleCounters {
    pub fn snapshot(&self) -> ThrottleStats {
        ThrottleStats {
            allowed: self.allowed.load(Ordering::Relaxed),
            suppressed: self.suppressed.load(Ordering::Relaxed),
            fail_open: self.fail_open.load(Ordering::Relaxed),
        }
    }
}
