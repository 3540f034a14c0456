//! Character motion: shared kinematic state, integration and ground probing.
//!
//! Every locomotion state reads and writes the same [`MotionState`]. Only the
//! active state touches it during a tick, and only the machine owns it.
//!
//! # Conventions
//!
//! - `+Y` is up, `+Z` is the character's forward axis at identity rotation.
//! - `position` is at the feet.
//! - Units are meters and seconds.

pub mod integrator;
mod probe;
mod world;

pub use probe::{probe_ground, GroundContact};
pub use world::{Aabb, GroundQuery, RayHit, StaticWorld};

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Kinematic state shared by all locomotion states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    /// Feet position in world space (meters).
    pub position: Vec3,

    /// Facing. Only yaw is ever written by the integrator.
    pub rotation: Quat,

    /// World-space velocity (meters/second).
    ///
    /// The vertical component is authoritative only while airborne; entering
    /// Move resets it to the gravity constant.
    pub velocity: Vec3,

    /// Result of the most recent ground probe.
    pub is_grounded: bool,

    /// Current (damped) value of the move blend parameter.
    pub move_blend: f32,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            is_grounded: false,
            move_blend: 0.0,
        }
    }
}

impl MotionState {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            rotation: self.rotation,
        }
    }

    /// Every component is a finite number.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.rotation.is_finite()
            && self.velocity.is_finite()
            && self.move_blend.is_finite()
    }
}

/// Authoritative transform written by the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    /// Unit forward vector (+Z rotated by the facing).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}
