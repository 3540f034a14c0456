//! Core State trait and the locomotion state tags.
//!
//! A state tag is a plain value naming where the machine is. The behavior
//! bound to each tag (enter, tick, exit) lives in [`crate::states`].

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Trait for state machine states.
///
/// All methods are pure - no side effects. States are small values that can
/// be logged, recorded in history and written to checkpoints.
///
/// # Required Traits
///
/// - `Clone`: States must be cloneable for history tracking
/// - `PartialEq`: States must be comparable for transition logic
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States must be serializable for checkpoints
///
/// # Example
///
/// ```rust
/// use kinesis::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Swim {
///     Surface,
///     Dive,
/// }
///
/// impl State for Swim {
///     fn name(&self) -> &str {
///         match self {
///             Self::Surface => "Surface",
///             Self::Dive => "Dive",
///         }
///     }
///
///     fn is_airborne(&self) -> bool {
///         false
///     }
/// }
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if the character has left the ground in this state.
    ///
    /// Airborne states own the vertical velocity; grounded states reset it
    /// on entry.
    ///
    /// Default implementation returns `false`.
    fn is_airborne(&self) -> bool {
        false
    }
}

/// The three locomotion states of a character.
///
/// There is no terminal state: a machine cycles between these for the
/// lifetime of its character.
///
/// ```text
/// Move --(lost ground)--> Fall --(grounded)--> Move
/// Move --(jump intent)--> Jump --(apex)------> Fall
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum LocomotionState {
    /// Grounded walking and idling.
    Move,
    /// Rising after a jump impulse.
    Jump,
    /// Airborne and descending.
    Fall,
}

impl LocomotionState {
    /// Every state, in declaration order.
    pub const ALL: [LocomotionState; 3] = [Self::Move, Self::Jump, Self::Fall];
}

impl State for LocomotionState {
    fn name(&self) -> &str {
        match self {
            Self::Move => "Move",
            Self::Jump => "Jump",
            Self::Fall => "Fall",
        }
    }

    fn is_airborne(&self) -> bool {
        matches!(self, Self::Jump | Self::Fall)
    }
}

impl fmt::Display for LocomotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
