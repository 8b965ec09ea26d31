//! Alert band: the `[min, max]` price interval that counts as "inside".
//!
//! The band is derived from a target price and a distance expressed in ticks,
//! absolute price, or percent of the target. Bounds are snapped to the
//! instrument's tick grid so that a band never ends between two tradable
//! prices.

use std::fmt;

/// Unit in which an alert distance is expressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DistanceUnit {
    /// Multiples of the instrument ticksize.
    #[default]
    Tick,
    /// Absolute price offset.
    Price,
    /// Percent of the target price.
    Percent,
}

/// Half-width of the band around the target, in `unit`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Distance {
    pub unit: DistanceUnit,
    pub amount: f64,
}

impl Distance {
    pub const fn new(unit: DistanceUnit, amount: f64) -> Self {
        Self { unit, amount }
    }

    /// Zero distance: the band collapses onto the target price.
    pub const fn exact() -> Self {
        Self::new(DistanceUnit::Tick, 0.0)
    }
}

/// Closed price interval `[min, max]`.
///
/// `Band::INVALID` (NaN bounds) stands for "no valid target this tick". Every
/// comparison against it is false, so it never overlaps or contains a price.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const INVALID: Band = Band {
        min: f64::NAN,
        max: f64::NAN,
    };

    /// Degenerate single-price band.
    pub const fn point(price: f64) -> Self {
        Self {
            min: price,
            max: price,
        }
    }

    /// False for the NaN band.
    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    /// Does the closed interval `[low, high]` touch the band?
    pub fn overlaps(&self, low: f64, high: f64) -> bool {
        low <= self.max && high >= self.min
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "[{}, {}]", self.min, self.max)
        } else {
            f.write_str("[invalid]")
        }
    }
}

/// Build the band around `price`.
///
/// - `distance <= 0` returns `{price, price}` without rounding.
/// - Otherwise `delta` is `distance` ticks, `distance` price units, or
///   `distance` percent of `|price|`, and both bounds are snapped to `ticksize`.
///
/// `min <= max` holds for every non-NaN input, negative prices included.
///
/// NaN inputs propagate to NaN bounds.
pub fn compute_band(ticksize: f64, price: f64, unit: DistanceUnit, distance: f64) -> Band {
    if distance <= 0.0 {
        return Band::point(price);
    }

    let delta = match unit {
        DistanceUnit::Tick => distance * ticksize,
        DistanceUnit::Price => distance,
        DistanceUnit::Percent => (distance * price / 100.0).abs(),
    };

    Band {
        min: round_to_tick(price - delta, ticksize),
        max: round_to_tick(price + delta, ticksize),
    }
}

const MAX_DECIMALS: u32 = 15;

/// Snap `value` to the nearest multiple of `step`, then round to the number of
/// decimals `step` itself carries (0.25 → 2, 0.5 → 1, 1.0 → 0).
///
/// The second rounding removes float residue such as `99.75000000000001`.
/// A non-positive or non-finite `step` leaves `value` untouched.
pub fn round_to_tick(value: f64, step: f64) -> f64 {
    if !(step > 0.0 && step.is_finite()) {
        return value;
    }

    let snapped = (value / step).round() * step;
    let scale = 10f64.powi(step_decimals(step) as i32);

    (snapped * scale).round() / scale
}

fn step_decimals(step: f64) -> u32 {
    let mut scaled = step;
    for decimals in 0..MAX_DECIMALS {
        let whole = scaled.round();
        // a step below one unit at this scale has not reached its last digit
        if whole != 0.0 && (scaled - whole).abs() < 1e-9 * scaled.abs().max(1.0) {
            return decimals;
        }
        scaled *= 10.0;
    }
    MAX_DECIMALS
}
