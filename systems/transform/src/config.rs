use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tile_twister_core::Transform;

/// Step intervals of every transform, in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Interval between horizontal mirror steps.
    pub horizontal_mirror_ms: u64,
    /// Interval between vertical mirror steps.
    pub vertical_mirror_ms: u64,
    /// Interval between diagonal swap steps.
    pub diagonal_ms: u64,
    /// Interval between quarter rotation steps.
    pub quarter_rotation_ms: u64,
    /// Interval between floor rotation steps.
    pub floor_rotate_ms: u64,
    /// Interval between floor change steps.
    pub floor_change_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            horizontal_mirror_ms: 50,
            vertical_mirror_ms: 50,
            diagonal_ms: 100,
            quarter_rotation_ms: 50,
            floor_rotate_ms: 50,
            floor_change_ms: 50,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from TOML, filling omitted keys with defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Interval between two steps of the transform.
    #[must_use]
    pub fn step_interval(&self, transform: Transform) -> Duration {
        Duration::from_millis(self.interval_ms(transform))
    }

    fn interval_ms(&self, transform: Transform) -> u64 {
        match transform {
            Transform::HorizontalMirror => self.horizontal_mirror_ms,
            Transform::VerticalMirror => self.vertical_mirror_ms,
            Transform::Diagonal => self.diagonal_ms,
            Transform::QuarterRotation(_) => self.quarter_rotation_ms,
            Transform::FloorRotate(_) => self.floor_rotate_ms,
            Transform::FloorChange(_) => self.floor_change_ms,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("horizontal_mirror_ms", self.horizontal_mirror_ms),
            ("vertical_mirror_ms", self.vertical_mirror_ms),
            ("diagonal_ms", self.diagonal_ms),
            ("quarter_rotation_ms", self.quarter_rotation_ms),
            ("floor_rotate_ms", self.floor_rotate_ms),
            ("floor_change_ms", self.floor_change_ms),
        ];
        match named.into_iter().find(|(_, value)| *value == 0) {
            Some((key, _)) => Err(ConfigError::ZeroInterval(key)),
            None => Ok(()),
        }
    }
}

/// Errors raised while loading an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A step interval was zero.
    #[error("step interval `{0}` must be greater than zero")]
    ZeroInterval(&'static str),
}
