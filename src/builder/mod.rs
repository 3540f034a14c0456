//! Builder API for character machine construction.
//!
//! ```
//! use glam::Vec3;
//! use kinesis::animation::NullAnimator;
//! use kinesis::builder::CharacterBuilder;
//! use kinesis::config::MotionConfig;
//! use kinesis::core::LocomotionState;
//!
//! let mut machine = CharacterBuilder::new()
//!     .config(MotionConfig { move_speed: 4.0, ..MotionConfig::default() })
//!     .spawn_at(Vec3::new(0.0, 12.0, 0.0))
//!     .initial(LocomotionState::Fall)
//!     .animator(NullAnimator)
//!     .build()
//!     .unwrap();
//!
//! machine.start();
//! assert_eq!(machine.state(), Some(LocomotionState::Fall));
//! ```

pub mod character;
pub mod error;

pub use character::CharacterBuilder;
pub use error::BuildError;
