use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use fanuc_link::drivers::FanucDriverConfig;
use fanuc_link::JointAngles;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// ```rust,ignore
/// // tracker.json, every field optional
/// {
///     "driver": { "addr": "172.27.221.60", "command_port": 59002, "telemetry_port": 59003 },
///     "steps": 10,
///     "follow": false,
///     "tool_orientation": [180.0, 0.0, 0.0],
///     "ready_joints": { "J1": 0.0, "J2": 0.0, "J3": 0.0, "J4": 0.0, "J5": -90.0, "J6": 0.0 },
///     "calibration": "CamCalibStable.txt"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    pub driver: FanucDriverConfig,
    /// Waypoints per planned trajectory.
    pub steps: usize,
    /// Keep re-detecting and chase the marker instead of stopping at the
    /// first goal.
    pub follow: bool,
    /// `w`, `p`, `r` in degrees sent with every waypoint.
    pub tool_orientation: [f64; 3],
    /// Joint pose the flange transform is computed from once at startup.
    pub ready_joints: JointAngles,
    pub calibration: Option<PathBuf>,
}

impl TrackerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: TrackerConfig = serde_json::from_str(&text)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.driver.validate().map_err(ConfigError::Invalid)?;
        self.step_count()?;
        if self.tool_orientation.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid("tool orientation must be finite".to_string()));
        }
        if self.ready_joints.to_array().iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid("ready joints must be finite".to_string()));
        }
        Ok(())
    }

    pub fn step_count(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.steps)
            .ok_or_else(|| ConfigError::Invalid("steps must be at least 1".to_string()))
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            driver: FanucDriverConfig::default(),
            steps: 10,
            follow: false,
            tool_orientation: [180.0, 0.0, 0.0],
            ready_joints: JointAngles::new(0.0, 0.0, 0.0, 0.0, -90.0, 0.0),
            calibration: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TrackerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.step_count().unwrap().get(), 10);
        assert_eq!(config.driver.addr, "172.27.221.60");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: TrackerConfig = serde_json::from_str(
            r#"{ "steps": 4, "follow": true, "driver": { "addr": "10.0.0.7" } }"#,
        )
        .unwrap();
        assert_eq!(config.steps, 4);
        assert!(config.follow);
        assert_eq!(config.driver.addr, "10.0.0.7");
        assert_eq!(config.driver.telemetry_port, 59003);
        assert_eq!(config.ready_joints.j5, -90.0);
        assert_eq!(config.tool_orientation, [180.0, 0.0, 0.0]);
    }

    #[test]
    fn test_zero_steps_rejected() {
        let config = TrackerConfig {
            steps: 0,
            ..TrackerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_bad_json_is_a_parse_error() {
        let err = serde_json::from_str::<TrackerConfig>("{ steps: }")
            .map_err(ConfigError::from)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
