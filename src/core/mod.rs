//! Core state types.
//!
//! This module contains the pure data side of the state machine:
//! - State tags via the `State` trait and [`LocomotionState`]
//! - Bounded history of transitions
//!
//! Nothing here touches motion, input or animation.

mod history;
mod state;

pub use history::{StateHistory, StateTransition, TransitionCause};
pub use state::{LocomotionState, State};
