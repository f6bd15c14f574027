//! Application settings: roll pacing, single-flight policy, role mode and
//! catalog location.
//!
//! Every value has a default. `AppSettings::from_env()` overrides them from
//! `RIFTROLL_*` variables; a missing variable keeps the default silently, an
//! unparseable one keeps the default with a warning.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use riftroll_domain::RoleMode;
use serde::{Deserialize, Serialize};

pub const ENV_TICK_MS: &str = "RIFTROLL_TICK_MS";
pub const ENV_MIN_ROLL_MS: &str = "RIFTROLL_MIN_ROLL_MS";
pub const ENV_MAX_ROLL_MS: &str = "RIFTROLL_MAX_ROLL_MS";
pub const ENV_FLIGHT_POLICY: &str = "RIFTROLL_FLIGHT_POLICY";
pub const ENV_ROLE: &str = "RIFTROLL_ROLE";
pub const ENV_CATALOG_PATH: &str = "RIFTROLL_CATALOG_PATH";

// ============================================================================
// Roll Settings
// ============================================================================

/// Pacing of an animated roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollSettings {
    /// Delay between intermediate draws
    pub tick_interval_ms: u64,
    /// Shortest total roll duration
    pub min_duration_ms: u64,
    /// Longest total roll duration
    pub max_duration_ms: u64,
}

impl Default for RollSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 150,
            min_duration_ms: 2000,
            max_duration_ms: 3000,
        }
    }
}

impl RollSettings {
    pub fn new(tick_interval_ms: u64, min_duration_ms: u64, max_duration_ms: u64) -> Self {
        Self {
            tick_interval_ms,
            min_duration_ms,
            max_duration_ms,
        }
    }

    /// Never zero, so an animation always makes progress.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// `(min, max)` with the bounds swapped if configured backwards.
    pub fn duration_bounds_ms(&self) -> (u64, u64) {
        if self.min_duration_ms <= self.max_duration_ms {
            (self.min_duration_ms, self.max_duration_ms)
        } else {
            (self.max_duration_ms, self.min_duration_ms)
        }
    }
}

// ============================================================================
// Flight Policy
// ============================================================================

/// What a randomize-all trigger does while a cycle is already running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightPolicy {
    /// Ignore the trigger.
    Drop,
    /// Queue one re-run; further triggers collapse into it.
    #[default]
    Coalesce,
}

impl std::fmt::Display for FlightPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlightPolicy::Drop => write!(f, "drop"),
            FlightPolicy::Coalesce => write!(f, "coalesce"),
        }
    }
}

impl FromStr for FlightPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" | "ignore" => Ok(FlightPolicy::Drop),
            "coalesce" | "queue" => Ok(FlightPolicy::Coalesce),
            other => Err(format!("Unknown flight policy: '{}'", other)),
        }
    }
}

// ============================================================================
// App Settings
// ============================================================================

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/catalog.json")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub roll: RollSettings,
    #[serde(default)]
    pub flight_policy: FlightPolicy,
    #[serde(default)]
    pub role: RoleMode,
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            roll: RollSettings::default(),
            flight_policy: FlightPolicy::default(),
            role: RoleMode::default(),
            catalog_path: default_catalog_path(),
        }
    }
}

impl AppSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            roll: RollSettings {
                tick_interval_ms: parse_or(&lookup, ENV_TICK_MS, defaults.roll.tick_interval_ms),
                min_duration_ms: parse_or(&lookup, ENV_MIN_ROLL_MS, defaults.roll.min_duration_ms),
                max_duration_ms: parse_or(&lookup, ENV_MAX_ROLL_MS, defaults.roll.max_duration_ms),
            },
            flight_policy: parse_or(&lookup, ENV_FLIGHT_POLICY, defaults.flight_policy),
            role: parse_or(&lookup, ENV_ROLE, defaults.role),
            catalog_path: lookup(ENV_CATALOG_PATH)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.parse::<T>() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                key = %key,
                value = %raw,
                error = %e,
                default = %default,
                "Invalid setting, using default"
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_item_roll_pacing() {
        let settings = AppSettings::from_lookup(lookup(&[]));
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.roll.tick_interval(), Duration::from_millis(150));
        assert_eq!(settings.roll.duration_bounds_ms(), (2000, 3000));
        assert_eq!(settings.flight_policy, FlightPolicy::Coalesce);
        assert_eq!(settings.role, RoleMode::Fill);
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = AppSettings::from_lookup(lookup(&[
            (ENV_TICK_MS, "100"),
            (ENV_MIN_ROLL_MS, "1000"),
            (ENV_MAX_ROLL_MS, "1000"),
            (ENV_FLIGHT_POLICY, "drop"),
            (ENV_ROLE, "jungle"),
            (ENV_CATALOG_PATH, "/tmp/catalog.json"),
        ]));
        assert_eq!(settings.roll, RollSettings::new(100, 1000, 1000));
        assert_eq!(settings.flight_policy, FlightPolicy::Drop);
        assert_eq!(settings.role, RoleMode::Jungle);
        assert_eq!(settings.catalog_path, PathBuf::from("/tmp/catalog.json"));
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let settings = AppSettings::from_lookup(lookup(&[
            (ENV_TICK_MS, "fast"),
            (ENV_FLIGHT_POLICY, "sometimes"),
            (ENV_ROLE, "mascot"),
            (ENV_CATALOG_PATH, "  "),
        ]));
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn zero_tick_is_clamped_and_reversed_bounds_are_swapped() {
        let settings = RollSettings::new(0, 3000, 2000);
        assert_eq!(settings.tick_interval(), Duration::from_millis(1));
        assert_eq!(settings.duration_bounds_ms(), (2000, 3000));
    }

    #[test]
    fn flight_policy_round_trips_through_text() {
        for policy in [FlightPolicy::Drop, FlightPolicy::Coalesce] {
            assert_eq!(policy.to_string().parse::<FlightPolicy>(), Ok(policy));
        }
    }
}
