//! Kinesis: a host-driven character locomotion state machine
//!
//! Kinesis is the locomotion core of an avatar: a three-state machine
//! (Move, Jump, Fall) on top of a small motion integrator and a two-ray
//! ground probe. It owns no loop, no thread and no engine; the host calls
//! [`machine::CharacterMachine::tick`] once per fixed step and supplies world
//! geometry, input and an animation sink through plain traits.
//!
//! # Core Concepts
//!
//! - **State**: Tagged locomotion states via the `State` trait
//! - **Machine**: Exactly one active state; `exit` always completes before `enter`
//! - **Motion**: Shared velocity and pose, integrated every tick
//! - **Ground probe**: Short ray for contact, long ray as a guard against the void
//! - **Jump intent**: Event-driven, accepted only through a scoped subscription
//!
//! # Example
//!
//! ```rust
//! use glam::Vec3;
//! use kinesis::animation::NullAnimator;
//! use kinesis::builder::CharacterBuilder;
//! use kinesis::core::LocomotionState;
//! use kinesis::input::MoveInput;
//! use kinesis::motion::StaticWorld;
//!
//! let world = StaticWorld::new().with_floor(0.0, 100.0);
//! let mut machine = CharacterBuilder::new()
//!     .spawn_at(Vec3::new(0.0, 10.0, 0.0))
//!     .animator(NullAnimator)
//!     .build()
//!     .unwrap();
//!
//! machine.start();
//! for _ in 0..200 {
//!     machine.tick(1.0 / 50.0, &MoveInput::idle(), &world);
//! }
//!
//! assert_eq!(machine.state(), Some(LocomotionState::Move));
//! assert!(machine.pose().position.y.abs() < 1e-4);
//! ```

pub mod animation;
pub mod builder;
pub mod checkpoint;
pub mod clock;
pub mod config;
pub mod core;
pub mod input;
pub mod machine;
pub mod motion;
mod states;

// Re-export commonly used types
pub use crate::core::{LocomotionState, State, StateHistory, StateTransition, TransitionCause};
pub use builder::CharacterBuilder;
pub use machine::{CharacterId, CharacterMachine};
