//! Band-entry state machine shared by level and line alerts.
//!
//! States:
//! - Idle: price is not inside the band (`triggered == false`).
//! - Armed: price entered the band and the entry was either fired or
//!   suppressed (`triggered == true`). No re-fire until the price leaves.
//!
//! Crossings are detected on the interval between the previous and the
//! current sample, so a price that jumps over the band between two ticks
//! still counts as an entry.

use tracing::{debug, trace};

use super::Frequency;
use crate::band::Band;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CrossingState {
    /// Price seen on the previous sample. `None` until the first sample.
    last_price: Option<f64>,
    /// Bar index of the last entry (fired or suppressed).
    last_fired_index: Option<i32>,
    /// Hysteresis flag: inside the band and already handled.
    triggered: bool,
}

impl CrossingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_price(&self) -> Option<f64> {
        self.last_price
    }

    pub fn last_fired_index(&self) -> Option<i32> {
        self.last_fired_index
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Clear hysteresis after a configuration change.
    ///
    /// `last_price` is kept so the next sample can still detect a gap across
    /// the new band.
    pub fn reset(&mut self) {
        self.last_fired_index = None;
        self.triggered = false;
    }

    /// Advance with one sample against `band`. Returns true to fire.
    pub fn step(&mut self, band: &Band, frequency: Frequency, price: f64, bar_index: i32) -> bool {
        let previous = *self.last_price.get_or_insert(price);
        let (low, high) = if previous <= price {
            (previous, price)
        } else {
            (price, previous)
        };
        self.last_price = Some(price);

        // NaN bounds or NaN prices fail every comparison and land here.
        if !band.overlaps(low, high) {
            self.triggered = false;
            return false;
        }

        if self.triggered {
            if !band.contains(price) {
                trace!(price, %band, "crossed through band; re-armed");
                self.triggered = false;
            }
            return false;
        }

        let ignore = match frequency {
            Frequency::OncePerBar => self.last_fired_index == Some(bar_index),
            Frequency::Once => self.last_fired_index.is_some(),
            Frequency::EveryTime => false,
        };

        self.triggered = true;
        self.last_fired_index = Some(bar_index);

        if ignore {
            debug!(price, bar_index, ?frequency, %band, "band entry suppressed");
        } else {
            debug!(price, bar_index, ?frequency, %band, "band entry");
        }

        !ignore
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAND: Band = Band {
        min: 99.0,
        max: 101.0,
    };

    fn run(state: &mut CrossingState, frequency: Frequency, path: &[(f64, i32)]) -> Vec<bool> {
        path.iter()
            .map(|&(p, i)| state.step(&BAND, frequency, p, i))
            .collect()
    }

    #[test]
    fn first_sample_seeds_last_price() {
        let mut s = CrossingState::new();
        assert!(!s.step(&BAND, Frequency::EveryTime, 98.0, 0));
        assert_eq!(s.last_price(), Some(98.0));
        assert!(!s.is_triggered());
    }

    #[test]
    fn first_sample_inside_band_fires() {
        let mut s = CrossingState::new();
        assert!(s.step(&BAND, Frequency::EveryTime, 100.0, 0));
        assert!(s.is_triggered());
    }

    #[test]
    fn gap_over_band_is_a_crossing() {
        let mut s = CrossingState::new();
        let fired = run(&mut s, Frequency::EveryTime, &[(98.0, 0), (102.0, 1)]);
        assert_eq!(fired, vec![false, true]);
        // Landed outside: armed flag already cleared on the next outside tick.
        assert!(!s.step(&BAND, Frequency::EveryTime, 103.0, 2));
        assert!(!s.is_triggered());
    }

    #[test]
    fn no_refire_while_inside() {
        let mut s = CrossingState::new();
        let fired = run(
            &mut s,
            Frequency::EveryTime,
            &[(98.0, 0), (99.5, 1), (100.0, 2), (100.5, 3), (99.0, 4)],
        );
        assert_eq!(fired, vec![false, true, false, false, false]);
    }

    #[test]
    fn leaving_and_reentering_fires_again() {
        let mut s = CrossingState::new();
        let fired = run(
            &mut s,
            Frequency::EveryTime,
            &[(98.0, 0), (100.0, 1), (97.0, 2), (96.0, 3), (100.0, 4)],
        );
        assert_eq!(fired, vec![false, true, false, false, true]);
    }

    #[test]
    fn crossing_out_through_band_rearms_without_firing() {
        let mut s = CrossingState::new();
        // inside, then straight through to the far side
        assert!(s.step(&BAND, Frequency::EveryTime, 100.0, 0));
        assert!(!s.step(&BAND, Frequency::EveryTime, 102.0, 1));
        assert!(!s.is_triggered());
        // back down through the band is a fresh crossing
        assert!(s.step(&BAND, Frequency::EveryTime, 98.0, 2));
    }

    #[test]
    fn once_per_bar_suppresses_second_entry_on_same_bar() {
        let mut s = CrossingState::new();
        let fired = run(
            &mut s,
            Frequency::OncePerBar,
            &[(98.0, 5), (100.0, 5), (97.0, 5), (100.0, 5), (97.0, 6), (100.0, 6)],
        );
        assert_eq!(fired, vec![false, true, false, false, false, true]);
        assert_eq!(s.last_fired_index(), Some(6));
    }

    #[test]
    fn suppressed_entry_still_arms() {
        let mut s = CrossingState::new();
        run(&mut s, Frequency::OncePerBar, &[(98.0, 1), (100.0, 1), (97.0, 1)]);
        assert!(!s.step(&BAND, Frequency::OncePerBar, 100.0, 1));
        assert!(s.is_triggered());
        // still inside on the next bar: hysteresis holds
        assert!(!s.step(&BAND, Frequency::OncePerBar, 100.5, 2));
    }

    #[test]
    fn once_fires_a_single_time_until_reset() {
        let mut s = CrossingState::new();
        let fired = run(
            &mut s,
            Frequency::Once,
            &[(98.0, 0), (100.0, 1), (97.0, 2), (100.0, 3), (97.0, 4), (100.0, 5)],
        );
        assert_eq!(fired, vec![false, true, false, false, false, false]);

        assert!(!s.step(&BAND, Frequency::Once, 96.0, 6));
        assert!(!s.step(&BAND, Frequency::Once, 95.0, 7));

        s.reset();
        assert!(s.step(&BAND, Frequency::Once, 100.0, 8));
    }

    #[test]
    fn reset_keeps_last_price() {
        let mut s = CrossingState::new();
        run(&mut s, Frequency::EveryTime, &[(98.0, 0), (100.0, 1)]);
        s.reset();

        assert_eq!(s.last_price(), Some(100.0));
        assert_eq!(s.last_fired_index(), None);
        assert!(!s.is_triggered());
    }

    #[test]
    fn invalid_band_never_fires() {
        let mut s = CrossingState::new();
        for (i, p) in [98.0, 100.0, 102.0, 100.0].into_iter().enumerate() {
            assert!(!s.step(&Band::INVALID, Frequency::EveryTime, p, i as i32));
        }
        assert!(!s.is_triggered());
    }
}
