//! Controller configuration.

use crate::builder::error::BuildError;
use crate::builder::validation;
use crate::core::{DirectionPair, PairGroups, DEFAULT_HISTORY_LIMIT};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;

pub const DEFAULT_MIN_GREEN: Duration = Duration::from_secs(20);
pub const DEFAULT_MAX_GREEN: Duration = Duration::from_secs(60);
pub const DEFAULT_YELLOW_CLEARANCE: Duration = Duration::from_secs(3);
pub const DEFAULT_DENSITY_SWITCH_RATIO: f64 = 1.5;

/// Timing and topology settings for a [`PhaseController`](crate::PhaseController).
///
/// Durations are written as seconds in serialized form. Missing fields take
/// their defaults, so `{}` is a complete configuration.
///
/// ```rust
/// use phaseplan::ControllerConfig;
/// use std::time::Duration;
///
/// let config = ControllerConfig::from_json(r#"{ "max_green_time": 45 }"#).unwrap();
/// assert_eq!(config.max_green_time, Duration::from_secs(45));
/// assert_eq!(config.min_green_time, Duration::from_secs(20));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Green is held at least this long regardless of density
    #[serde(with = "seconds")]
    pub min_green_time: Duration,

    /// Green is ended once it has lasted this long
    #[serde(with = "seconds")]
    pub max_green_time: Duration,

    /// Length of the yellow interval between greens
    #[serde(with = "seconds")]
    pub yellow_clearance: Duration,

    /// Waiting density must exceed active density times this ratio to switch
    pub density_switch_ratio: f64,

    pub approach_pairs: PairGroups,

    /// Pair that holds green when the controller starts
    pub default_pair: DirectionPair,

    /// Transitions retained in the controller history
    pub history_limit: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            min_green_time: DEFAULT_MIN_GREEN,
            max_green_time: DEFAULT_MAX_GREEN,
            yellow_clearance: DEFAULT_YELLOW_CLEARANCE,
            density_switch_ratio: DEFAULT_DENSITY_SWITCH_RATIO,
            approach_pairs: PairGroups::default(),
            default_pair: DirectionPair::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl ControllerConfig {
    /// Parse a configuration from JSON. The result is not yet validated.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check every rule, reporting all violations at once.
    pub fn validate(&self) -> Result<(), BuildError> {
        match validation::validate(self) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(violations) => Err(BuildError::InvalidConfig(
                violations.iter().cloned().collect(),
            )),
        }
    }
}

mod seconds {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::error::ConfigViolation;
    use crate::core::Approach;

    #[test]
    fn defaults_match_reference_timing() {
        let config = ControllerConfig::default();
        assert_eq!(config.min_green_time, Duration::from_secs(20));
        assert_eq!(config.max_green_time, Duration::from_secs(60));
        assert_eq!(config.yellow_clearance, Duration::from_secs(3));
        assert_eq!(config.density_switch_ratio, 1.5);
        assert_eq!(config.default_pair, DirectionPair::A);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_json_gives_defaults() {
        let config = ControllerConfig::from_json("{}").unwrap();
        assert_eq!(config, ControllerConfig::default());
    }

    #[test]
    fn json_accepts_fractional_seconds_and_pairs() {
        let config = ControllerConfig::from_json(
            r#"{
                "yellow_clearance": 2.5,
                "approach_pairs": { "a": ["North", "East"], "b": ["South", "West"] },
                "default_pair": "B"
            }"#,
        )
        .unwrap();

        assert_eq!(config.yellow_clearance, Duration::from_millis(2500));
        assert!(config.approach_pairs.a.contains(&Approach::East));
        assert_eq!(config.default_pair, DirectionPair::B);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn negative_duration_fails_to_parse() {
        let result = ControllerConfig::from_json(r#"{ "yellow_clearance": -3 }"#);
        assert!(matches!(result, Err(BuildError::Parse(_))));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = ControllerConfig {
            min_green_time: Duration::from_secs(15),
            ..ControllerConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ControllerConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn validate_reports_every_violation() {
        let config = ControllerConfig {
            min_green_time: Duration::from_secs(60),
            max_green_time: Duration::from_secs(30),
            yellow_clearance: Duration::ZERO,
            density_switch_ratio: f64::NAN,
            ..ControllerConfig::default()
        };

        let err = config.validate().unwrap_err();
        let violations = err.violations();

        assert_eq!(violations.len(), 3);
        assert!(violations
            .iter()
            .any(|v| matches!(v, ConfigViolation::GreenBoundsInverted { .. })));
        assert!(violations.contains(&ConfigViolation::ZeroYellowClearance));
        assert!(violations
            .iter()
            .any(|v| matches!(v, ConfigViolation::InvalidSwitchRatio { .. })));
    }
}
