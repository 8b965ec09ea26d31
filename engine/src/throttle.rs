//! Shared alert rate limiter.
//!
//! One `AlertThrottle` is constructed by the host and handed (as
//! `Arc<AlertThrottle>`) to everything that dispatches alerts. Entries are
//! keyed by instrument, so independent alerts on the same instrument share
//! one bucket. Entries are never removed; the table lives as long as the
//! throttle.

use std::collections::HashMap;
use std::sync::atomic::Ordering;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::metrics::{ThrottleCounters, ThrottleStats};

pub struct AlertThrottle {
    /// key -> last allowed fire (ms since epoch)
    table: Mutex<HashMap<String, i64>>,
    lock_timeout: Duration,
    counters: ThrottleCounters,
}

impl Default for AlertThrottle {
    fn default() -> Self {
        Self::new(EngineConfig::default().lock_timeout())
    }
}

impl AlertThrottle {
    pub fn new(lock_timeout: Duration) -> Self {
        Self {
            table: Mutex::new(HashMap::new()),
            lock_timeout,
            counters: ThrottleCounters::default(),
        }
    }

    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self::new(cfg.lock_timeout())
    }

    /// Rate-limit `key` against the wall clock. See [`AlertThrottle::check_at`].
    pub fn check(&self, key: &str, throttle_ms: i64) -> bool {
        self.check_at(key, throttle_ms, common::time::now_ms())
    }

    /// Returns true if an alert for `key` may be dispatched at `now_ms`.
    ///
    /// - first use of `key`, or at least `throttle_ms` since the last allowed
    ///   alert: records `now_ms` and allows.
    /// - otherwise: suppresses, leaving the stored timestamp untouched.
    /// - table lock not acquired within the lock timeout: allows without
    ///   recording (fail open).
    pub fn check_at(&self, key: &str, throttle_ms: i64, now_ms: i64) -> bool {
        let Some(mut table) = self.table.try_lock_for(self.lock_timeout) else {
            self.counters.fail_open.fetch_add(1, Ordering::Relaxed);
            warn!(
                key,
                timeout_ms = self.lock_timeout.as_millis() as u64,
                "throttle lock timed out; allowing alert"
            );
            return true;
        };

        if let Some(&last) = table.get(key) {
            let elapsed = now_ms.saturating_sub(last);
            if elapsed < throttle_ms {
                self.counters.suppressed.fetch_add(1, Ordering::Relaxed);
                debug!(key, elapsed_ms = elapsed, throttle_ms, "alert throttled");
                return false;
            }
        }

        table.insert(key.to_owned(), now_ms);
        self.counters.allowed.fetch_add(1, Ordering::Relaxed);
        true
    }

    // The accessors below block on the table lock without a timeout. They are
    // for diagnostics and tests, never for the dispatch path.

    /// Timestamp of the last allowed alert for `key`.
    pub fn last_fire_ms(&self, key: &str) -> Option<i64> {
        self.table.lock().get(key).copied()
    }

    /// Number of keys seen so far.
    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.lock().is_empty()
    }

    pub fn counters(&self) -> &ThrottleCounters {
        &self.counters
    }

    pub fn stats(&self) -> ThrottleStats {
        self.counters.snapshot()
    }
}
