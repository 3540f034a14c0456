//! Motion tuning constants.
//!
//! All values use metric units (meters, seconds). Every field has a default,
//! so a JSON document only needs to name what it overrides:
//!
//! ```rust
//! use kinesis::config::MotionConfig;
//!
//! let config = MotionConfig::from_json(r#"{ "move_speed": 4.5 }"#).unwrap();
//! assert_eq!(config.move_speed, 4.5);
//! assert_eq!(config.jump_force, MotionConfig::default().jump_force);
//! ```
//!
//! Validation accumulates ALL problems instead of stopping at the first one,
//! so a bad file is fixed in a single pass.

mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::warn;

type Check = Validation<(), NonEmptyVec<ConfigError>>;

/// Ground probe geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundProbeConfig {
    /// Height above the feet at which both probe rays start (meters).
    pub origin_offset: f32,

    /// How far below the feet a surface still counts as ground (meters).
    pub ground_distance: f32,

    /// Reach of the long-range probe. When nothing at all lies within this
    /// distance the character is treated as grounded instead of falling
    /// forever (meters).
    pub void_distance: f32,
}

impl Default for GroundProbeConfig {
    fn default() -> Self {
        Self {
            origin_offset: 0.1,
            ground_distance: 0.2,
            void_distance: 100.0,
        }
    }
}

impl GroundProbeConfig {
    /// Total length of the short ground ray.
    pub fn ground_reach(&self) -> f32 {
        self.origin_offset + self.ground_distance
    }
}

/// Configuration for character locomotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Horizontal speed while walking or steering a jump (meters/second).
    pub move_speed: f32,

    /// Upward velocity applied when a jump starts (meters/second).
    pub jump_force: f32,

    /// How quickly facing turns toward the move direction (1/second).
    pub look_rotation_damp_factor: f32,

    /// Vertical acceleration (meters/second², negative is down).
    ///
    /// Also the vertical velocity held while grounded, which keeps the
    /// character pressed onto slopes and steps.
    pub gravity: f32,

    /// Smoothing time for the move blend parameter (seconds).
    pub blend_damp_time: f32,

    /// Cross-fade duration for state entry cues (seconds).
    pub cross_fade_duration: f32,

    /// Number of transitions retained in the machine's history.
    pub history_capacity: usize,

    pub probe: GroundProbeConfig,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            jump_force: 5.0,
            look_rotation_damp_factor: 8.0,
            gravity: -9.81,
            blend_damp_time: 0.1,
            cross_fade_duration: 0.1,
            history_capacity: 64,
            probe: GroundProbeConfig::default(),
        }
    }
}

fn non_negative(field: &'static str, value: f32) -> Check {
    if value.is_finite() && value >= 0.0 {
        Validation::success(())
    } else {
        Validation::fail(ConfigError::Negative { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Check {
    if value.is_finite() && value > 0.0 {
        Validation::success(())
    } else {
        Validation::fail(ConfigError::NotPositive { field, value })
    }
}

impl MotionConfig {
    /// Parse a JSON document and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validated()
    }

    /// Check every field, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let mut checks: Vec<Check> = vec![
            non_negative("move_speed", self.move_speed),
            positive("jump_force", self.jump_force),
            non_negative("look_rotation_damp_factor", self.look_rotation_damp_factor),
            non_negative("blend_damp_time", self.blend_damp_time),
            non_negative("cross_fade_duration", self.cross_fade_duration),
            non_negative("probe.origin_offset", self.probe.origin_offset),
            positive("probe.ground_distance", self.probe.ground_distance),
        ];

        checks.push(if self.gravity.is_finite() && self.gravity < 0.0 {
            Validation::success(())
        } else {
            Validation::fail(ConfigError::GravityNotDownward(self.gravity))
        });

        let reach = self.probe.ground_reach();
        checks.push(if self.probe.void_distance > reach {
            Validation::success(())
        } else {
            Validation::fail(ConfigError::VoidProbeTooShort {
                void: self.probe.void_distance,
                reach,
            })
        });

        checks.push(if self.history_capacity > 0 {
            Validation::success(())
        } else {
            Validation::fail(ConfigError::EmptyHistory)
        });

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate, folding every violation into a single [`ConfigError::Invalid`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        match self.validate() {
            Validation::Success(_) => Ok(self),
            Validation::Failure(errors) => {
                let errors: Vec<ConfigError> = errors.iter().cloned().collect();
                warn!(violations = errors.len(), "rejected motion configuration");
                Err(ConfigError::Invalid(errors))
            }
        }
    }
}
