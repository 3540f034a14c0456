//! Checkpoint and resume for character machines.
//!
//! A checkpoint captures the active state, motion, configuration and history
//! of one character so it can be resumed later (save games, late-joining
//! replicas, replaying a bug report). Animation sinks and observers are host
//! objects and are not captured.
//!
//! ```rust
//! use kinesis::animation::NullAnimator;
//! use kinesis::checkpoint::Checkpoint;
//! use kinesis::config::MotionConfig;
//! use kinesis::machine::CharacterMachine;
//!
//! let mut machine = CharacterMachine::new(MotionConfig::default(), NullAnimator);
//! machine.start();
//!
//! let bytes = machine.checkpoint().to_bytes().unwrap();
//! let restored =
//!     CharacterMachine::restore(Checkpoint::from_bytes(&bytes).unwrap(), NullAnimator).unwrap();
//! assert_eq!(restored.state(), machine.state());
//! ```

use crate::config::MotionConfig;
use crate::core::{LocomotionState, StateHistory};
use crate::machine::CharacterId;
use crate::motion::MotionState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of one character machine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Character the checkpoint belongs to
    pub character: CharacterId,

    /// Active state, `None` if the machine was never started
    pub state: Option<LocomotionState>,

    /// State entered by `start`
    pub initial_state: LocomotionState,

    pub motion: MotionState,

    pub config: MotionConfig,

    /// Retained transition history
    pub history: StateHistory<LocomotionState>,

    /// Ticks run before the checkpoint
    pub ticks: u64,
}

impl Checkpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::Encode(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::Decode(e.to_string()))
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::Decode(e.to_string()))
    }

    /// Check the version and the captured data before resuming from it.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        self.config.clone().validated()?;

        if !self.motion.is_finite() {
            return Err(CheckpointError::NonFiniteMotion);
        }

        if self.history.len() > self.config.history_capacity {
            return Err(CheckpointError::HistoryOverflow {
                len: self.history.len(),
                capacity: self.config.history_capacity,
            });
        }

        Ok(())
    }
}
