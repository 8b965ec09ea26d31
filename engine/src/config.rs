use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_THROTTLE_MS: i64 = 1_000;
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Minimum spacing (ms) between two dispatched alerts for one
    /// throttle key (instrument).
    ///
    /// Independent alert instances watching the same instrument share the
    /// key, so this also deduplicates alerts across chart objects.
    pub throttle_ms: i64,

    /// Upper bound (ms) on waiting for the shared throttle table lock.
    ///
    /// If the lock is not acquired in time the alert is let through
    /// (fail open): a duplicate alert is preferred over a missed one.
    pub lock_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            throttle_ms: DEFAULT_THROTTLE_MS,
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
        }
    }
}

impl EngineConfig {
    /// Reads `ALERT_THROTTLE_MS` and `ALERT_LOCK_TIMEOUT_MS`.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`EngineConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();

        let throttle_ms = parse_non_negative(&lookup, "ALERT_THROTTLE_MS")?
            .unwrap_or(defaults.throttle_ms);
        let lock_timeout_ms = parse_non_negative(&lookup, "ALERT_LOCK_TIMEOUT_MS")?
            .map(|v| v as u64)
            .unwrap_or(defaults.lock_timeout_ms);

        Ok(Self {
            throttle_ms,
            lock_timeout_ms,
        })
    }

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

fn parse_non_negative<F>(lookup: &F, var: &'static str) -> Result<Option<i64>, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };

    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { var, value: raw.clone() })?;

    if value < 0 {
        return Err(ConfigError::OutOfRange { var, value });
    }

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = EngineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.lock_timeout(), Duration::from_millis(100));
    }

    #[test]
    fn reads_overrides() {
        let cfg = EngineConfig::from_lookup(lookup(&[
            ("ALERT_THROTTLE_MS", "2500"),
            ("ALERT_LOCK_TIMEOUT_MS", " 20 "),
        ]))
        .unwrap();

        assert_eq!(cfg.throttle_ms, 2_500);
        assert_eq!(cfg.lock_timeout_ms, 20);
    }

    #[test]
    fn rejects_garbage_and_negatives() {
        let err = EngineConfig::from_lookup(lookup(&[("ALERT_THROTTLE_MS", "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: "ALERT_THROTTLE_MS",
                value: "soon".into()
            }
        );

        let err =
            EngineConfig::from_lookup(lookup(&[("ALERT_LOCK_TIMEOUT_MS", "-1")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::OutOfRange {
                var: "ALERT_LOCK_TIMEOUT_MS",
                value: -1
            }
        );
        assert_eq!(err.to_string(), "ALERT_LOCK_TIMEOUT_MS: must not be negative, got -1");
    }
}
