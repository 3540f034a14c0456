//! Configuration errors.

use thiserror::Error;

/// Errors raised while loading or validating a [`super::MotionConfig`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be finite and non-negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be finite and greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("gravity must be finite and point downward (got {0})")]
    GravityNotDownward(f32),

    #[error("void probe distance ({void}) must exceed the ground probe reach ({reach})")]
    VoidProbeTooShort { void: f32, reach: f32 },

    #[error("history capacity must be at least 1")]
    EmptyHistory,

    #[error("invalid motion configuration: {}", join(.0))]
    Invalid(Vec<ConfigError>),

    #[error("failed to parse motion configuration: {0}")]
    Parse(String),
}

fn join(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
