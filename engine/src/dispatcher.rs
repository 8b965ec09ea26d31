//! Host-facing edge of the engine.
//!
//! Packages the dispatch contract `alert.check(..) && throttle.check(key, ms)`
//! and fans accepted alerts out to registered [`AlertSink`] observers. The
//! engine itself never formats or delivers anything; sinks do.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::alert::{CrossingAlert, Sample};
use crate::band::Band;
use crate::throttle::AlertThrottle;

/// An alert that passed both the crossing check and the throttle.
#[derive(Clone, Debug, PartialEq)]
pub struct AlertEvent {
    pub instrument: String,
    pub price: f64,
    pub bar_index: i32,
    pub time: f64,
    pub band: Band,
    /// Wall-clock dispatch time (ms since epoch).
    pub ts_ms: i64,
}

/// Observer notified for every dispatched alert.
pub trait AlertSink: Send + Sync {
    fn on_alert(&self, event: &AlertEvent);
}

pub struct AlertDispatcher {
    throttle: Arc<AlertThrottle>,
    throttle_ms: i64,
    sinks: Vec<Arc<dyn AlertSink>>,
}

impl AlertDispatcher {
    pub fn new(throttle: Arc<AlertThrottle>, throttle_ms: i64) -> Self {
        Self {
            throttle,
            throttle_ms,
            sinks: Vec::new(),
        }
    }

    pub fn register_sink(&mut self, sink: Arc<dyn AlertSink>) {
        self.sinks.push(sink);
    }

    pub fn throttle(&self) -> &Arc<AlertThrottle> {
        &self.throttle
    }

    /// Feed one sample to `alert` and dispatch if it fires and the
    /// instrument's throttle bucket allows it. Returns whether sinks were
    /// notified.
    ///
    /// The throttle is consulted only after a crossing, so quiet ticks never
    /// touch the shared lock.
    #[instrument(
        skip(self, alert, sample),
        target = "dispatcher",
        fields(price = sample.price, bar_index = sample.bar_index)
    )]
    pub fn evaluate(
        &self,
        alert: &mut dyn CrossingAlert,
        instrument: &str,
        sample: &Sample,
    ) -> bool {
        if !alert.check_sample(sample) {
            return false;
        }

        if !self.throttle.check(instrument, self.throttle_ms) {
            debug!("crossing throttled");
            return false;
        }

        let event = AlertEvent {
            instrument: instrument.to_owned(),
            price: sample.price,
            bar_index: sample.bar_index,
            time: sample.time,
            band: alert.band(),
            ts_ms: common::time::now_ms(),
        };

        self.notify(&event);
        true
    }

    /// Sinks are untrusted: one panicking sink does not stop the others.
    fn notify(&self, event: &AlertEvent) {
        for (idx, sink) in self.sinks.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                sink.on_alert(event);
            }));

            if result.is_err() {
                warn!(sink = idx, instrument = %event.instrument, "alert sink panicked");
            }
        }
    }
}
