//! Threshold-crossing alert engine.
//!
//! Hosts feed price samples into [`LevelAlert`] / [`LineAlert`]; a `true`
//! from `check` means the price entered the alert band on that sample. Before
//! surfacing an alert the host asks the shared [`AlertThrottle`] with an
//! instrument key, or lets [`AlertDispatcher`] do both steps.

pub mod alert;
pub mod band;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod throttle;

pub use alert::{CrossingAlert, Frequency, LevelAlert, LineAlert, Sample};
pub use band::{Band, Distance, DistanceUnit, compute_band};
pub use config::EngineConfig;
pub use dispatcher::{AlertDispatcher, AlertEvent, AlertSink};
pub use error::ConfigError;
pub use throttle::AlertThrottle;
