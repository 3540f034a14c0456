//! Player intent: continuous walk input and jump-intent subscriptions.
//!
//! Jump presses arrive as discrete events between simulation ticks. Only a
//! state holding a live [`JumpSubscription`] may react to one. Move acquires
//! its subscription on entry and hands it back on exit, so a press delivered
//! after Move is gone has nobody to wake up.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Continuous walk intent for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MoveInput {
    /// Stick/keyboard vector: `x` strafes right, `y` walks forward.
    /// Lengths above 1 are clamped.
    pub walk: Vec2,

    /// Yaw of the view (camera or head) the walk vector is relative to
    /// (radians, counter-clockwise around +Y).
    pub view_yaw: f32,
}

impl MoveInput {
    pub fn new(walk: Vec2) -> Self {
        Self {
            walk,
            view_yaw: 0.0,
        }
    }

    pub fn idle() -> Self {
        Self::default()
    }

    pub fn with_view_yaw(mut self, view_yaw: f32) -> Self {
        self.view_yaw = view_yaw;
        self
    }

    /// Whether any horizontal input is present.
    pub fn has_walk(&self) -> bool {
        self.walk.length_squared() > f32::EPSILON
    }

    /// Desired world-space move direction, at most unit length.
    pub fn direction(&self) -> Vec3 {
        if !self.has_walk() {
            return Vec3::ZERO;
        }
        let walk = self.walk.clamp_length_max(1.0);
        Quat::from_rotation_y(self.view_yaw) * Vec3::new(walk.x, 0.0, walk.y)
    }
}

/// Capability to receive jump intents.
///
/// Deliberately neither `Clone` nor `Copy`: exactly one owner, returned to
/// the registry with [`JumpIntents::release`].
#[derive(Debug, PartialEq, Eq)]
pub struct JumpSubscription {
    id: u64,
}

impl JumpSubscription {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Registry of live jump-intent listeners.
#[derive(Debug, Default)]
pub struct JumpIntents {
    next_id: u64,
    live: Vec<u64>,
}

impl JumpIntents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> JumpSubscription {
        let id = self.next_id;
        self.next_id += 1;
        self.live.push(id);
        JumpSubscription { id }
    }

    pub fn release(&mut self, subscription: JumpSubscription) {
        self.live.retain(|&id| id != subscription.id);
    }

    pub fn is_live(&self, subscription: &JumpSubscription) -> bool {
        self.live.contains(&subscription.id)
    }

    pub fn listener_count(&self) -> usize {
        self.live.len()
    }
}
