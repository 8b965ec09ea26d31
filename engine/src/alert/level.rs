//! Alert against a fixed price level.

use tracing::debug;

use super::{CrossingAlert, CrossingState, Frequency, Sample};
use crate::band::{Band, Distance, DistanceUnit, compute_band};

/// Fires when the price enters the band around a fixed `target`.
///
/// The band is computed eagerly by every setter; `check` only compares.
/// Not internally synchronized: feed one instance from one update stream.
#[derive(Clone, Debug)]
pub struct LevelAlert {
    ticksize: f64,
    frequency: Frequency,
    target: f64,
    distance: Distance,
    band: Band,
    state: CrossingState,
}

impl LevelAlert {
    pub fn new(ticksize: f64, target: f64, frequency: Frequency, distance: Distance) -> Self {
        let mut alert = Self {
            ticksize,
            frequency,
            target,
            distance,
            band: Band::INVALID,
            state: CrossingState::new(),
        };
        alert.reconfigure();
        alert
    }

    /// Feed one price sample; true when the price entered the band.
    pub fn check(&mut self, price: f64, bar_index: i32) -> bool {
        self.state.step(&self.band, self.frequency, price, bar_index)
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
        self.reconfigure();
    }

    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = frequency;
        self.reconfigure();
    }

    pub fn set_unit(&mut self, unit: DistanceUnit) {
        self.distance.unit = unit;
        self.reconfigure();
    }

    pub fn set_distance(&mut self, amount: f64) {
        self.distance.amount = amount;
        self.reconfigure();
    }

    pub fn set_ticksize(&mut self, ticksize: f64) {
        self.ticksize = ticksize;
        self.reconfigure();
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn band(&self) -> Band {
        self.band
    }

    pub fn state(&self) -> &CrossingState {
        &self.state
    }

    fn reconfigure(&mut self) {
        self.band = compute_band(
            self.ticksize,
            self.target,
            self.distance.unit,
            self.distance.amount,
        );
        self.state.reset();

        debug!(target_price = self.target, band = %self.band, "level alert reconfigured");
    }
}

impl CrossingAlert for LevelAlert {
    fn check_sample(&mut self, sample: &Sample) -> bool {
        self.check(sample.price, sample.bar_index)
    }

    fn band(&self) -> Band {
        self.band
    }
}
