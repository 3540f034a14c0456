//! Build errors for character machines.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a character machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Animation sink not specified. Call .animator(sink) before .build()")]
    MissingAnimator,

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}
