//! Crossing alerts.
//!
//! An alert watches one price stream and reports when the price enters its
//! band. Both kinds share the same hysteresis state machine
//! ([`crossing::CrossingState`]) and differ only in where the band comes from:
//! a fixed level, or a trend line sampled at the current time.
//!
//! Alerts are plain `&mut self` state machines. Callers must serialize calls
//! to a given instance (one update stream per owning chart object); only the
//! [`crate::throttle::AlertThrottle`] is shared across threads.

pub mod crossing;
pub mod level;
pub mod line;

pub use self::crossing::CrossingState;
pub use self::level::LevelAlert;
pub use self::line::LineAlert;

use crate::band::Band;

/// Re-trigger policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// At most one fire until the alert is reconfigured.
    ///
    /// Stricter than a plain hysteresis re-arm: leaving and re-entering the
    /// band does not fire again while a fire is remembered.
    Once,
    /// At most one fire per bar index.
    OncePerBar,
    /// Every band entry fires.
    #[default]
    EveryTime,
}

/// One host sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub price: f64,
    pub bar_index: i32,
    /// Chart time coordinate. Only line alerts read it.
    pub time: f64,
}

impl Sample {
    pub const fn new(price: f64, bar_index: i32, time: f64) -> Self {
        Self {
            price,
            bar_index,
            time,
        }
    }
}

/// Common surface of level and line alerts, used by the dispatcher.
pub trait CrossingAlert {
    /// Feed one sample. Returns true when a crossing worth alerting on
    /// happened on this sample.
    fn check_sample(&mut self, sample: &Sample) -> bool;

    /// Band used by the most recent check.
    fn band(&self) -> Band;
}
