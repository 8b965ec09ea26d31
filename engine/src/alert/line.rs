//! Alert against a moving target: a trend line sampled at the current time.

use geometry::Segment;
use tracing::{debug, trace};

use super::{CrossingAlert, CrossingState, Frequency, Sample};
use crate::band::{Band, Distance, DistanceUnit, compute_band};

/// Fires when the price enters the band around `line.y_at(time)`.
///
/// The line's x axis is chart time and its y axis is price. The band is
/// re-derived when `time` differs from the previous check, so repeated
/// repaints at one timestamp cost nothing. Setters recompute it at once for
/// the last seen time. A vertical line has no price at any time; its band is
/// [`Band::INVALID`] and the alert never fires.
///
/// Not internally synchronized: feed one instance from one update stream.
#[derive(Clone, Debug)]
pub struct LineAlert {
    ticksize: f64,
    frequency: Frequency,
    line: Segment,
    distance: Distance,
    band: Band,
    last_time: Option<f64>,
    dirty: bool,
    state: CrossingState,
}

impl LineAlert {
    pub fn new(ticksize: f64, line: Segment, frequency: Frequency, distance: Distance) -> Self {
        Self {
            ticksize,
            frequency,
            line,
            distance,
            band: Band::INVALID,
            last_time: None,
            dirty: true,
            state: CrossingState::new(),
        }
    }

    /// Feed one sample taken at chart time `time`.
    pub fn check(&mut self, price: f64, bar_index: i32, time: f64) -> bool {
        self.refresh_band(time);
        self.state.step(&self.band, self.frequency, price, bar_index)
    }

    pub fn set_line(&mut self, line: Segment) {
        self.line = line;
        self.invalidate();
    }

    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = frequency;
        self.invalidate();
    }

    pub fn set_unit(&mut self, unit: DistanceUnit) {
        self.distance.unit = unit;
        self.invalidate();
    }

    pub fn set_distance(&mut self, amount: f64) {
        self.distance.amount = amount;
        self.invalidate();
    }

    pub fn set_ticksize(&mut self, ticksize: f64) {
        self.ticksize = ticksize;
        self.invalidate();
    }

    pub fn line(&self) -> &Segment {
        &self.line
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Band of the last evaluated time. Invalid before the first check.
    pub fn band(&self) -> Band {
        self.band
    }

    pub fn state(&self) -> &CrossingState {
        &self.state
    }

    /// Target price the line implies at `time`.
    pub fn target_at(&self, time: f64) -> f64 {
        self.line.y_at(time)
    }

    fn invalidate(&mut self) {
        self.dirty = true;
        self.state.reset();
        if let Some(time) = self.last_time {
            self.refresh_band(time);
        }
    }

    fn refresh_band(&mut self, time: f64) {
        if !self.dirty && self.last_time == Some(time) {
            return;
        }

        let target = self.target_at(time);
        self.band = if target.is_nan() {
            Band::INVALID
        } else {
            compute_band(
                self.ticksize,
                target,
                self.distance.unit,
                self.distance.amount,
            )
        };
        self.last_time = Some(time);

        if self.dirty {
            self.dirty = false;
            debug!(time, target_price = target, band = %self.band, "line alert reconfigured");
        } else {
            trace!(time, target_price = target, band = %self.band, "line band resampled");
        }
    }
}

impl CrossingAlert for LineAlert {
    fn check_sample(&mut self, sample: &Sample) -> bool {
        self.check(sample.price, sample.bar_index, sample.time)
    }

    fn band(&self) -> Band {
        self.band
    }
}
