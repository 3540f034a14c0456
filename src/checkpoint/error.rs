//! Checkpoint error types.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while capturing, decoding or resuming from a checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Encoding to JSON or bincode failed
    #[error("failed to encode checkpoint: {0}")]
    Encode(String),

    /// Decoding from JSON or bincode failed
    #[error("failed to decode checkpoint: {0}")]
    Decode(String),

    #[error("unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The captured motion configuration no longer validates
    #[error("checkpoint carries an invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("checkpoint motion state contains non-finite values")]
    NonFiniteMotion,

    /// More transitions retained than the configured history allows
    #[error("checkpoint history holds {len} transitions, capacity is {capacity}")]
    HistoryOverflow { len: usize, capacity: usize },
}
