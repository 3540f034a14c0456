//! Builder for constructing character machines.

use crate::animation::AnimationSink;
use crate::builder::error::BuildError;
use crate::config::MotionConfig;
use crate::core::LocomotionState;
use crate::machine::{CharacterId, CharacterMachine, StateObserver};
use crate::motion::MotionState;
use glam::{Quat, Vec3};

/// Builder for character machines with a fluent API.
pub struct CharacterBuilder<A: AnimationSink> {
    id: Option<CharacterId>,
    config: MotionConfig,
    spawn: Vec3,
    facing: Quat,
    initial: LocomotionState,
    animator: Option<A>,
    observers: Vec<Box<dyn StateObserver + Send>>,
}

impl<A: AnimationSink> CharacterBuilder<A> {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            id: None,
            config: MotionConfig::default(),
            spawn: Vec3::ZERO,
            facing: Quat::IDENTITY,
            initial: LocomotionState::Move,
            animator: None,
            observers: Vec::new(),
        }
    }

    /// Reuse an existing character identifier instead of minting one.
    pub fn id(mut self, id: CharacterId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn config(mut self, config: MotionConfig) -> Self {
        self.config = config;
        self
    }

    /// Feet position the character starts at.
    pub fn spawn_at(mut self, position: Vec3) -> Self {
        self.spawn = position;
        self
    }

    pub fn facing(mut self, rotation: Quat) -> Self {
        self.facing = rotation;
        self
    }

    /// State entered by [`CharacterMachine::start`]. Defaults to Move.
    pub fn initial(mut self, state: LocomotionState) -> Self {
        self.initial = state;
        self
    }

    /// Set the animation sink (required).
    pub fn animator(mut self, animator: A) -> Self {
        self.animator = Some(animator);
        self
    }

    pub fn observer(mut self, observer: impl StateObserver + Send + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Build the machine. It is not started.
    /// Returns an error if the animator is missing or the configuration is invalid.
    pub fn build(self) -> Result<CharacterMachine<A>, BuildError> {
        let animator = self.animator.ok_or(BuildError::MissingAnimator)?;
        let config = self.config.validated()?;

        let motion = MotionState {
            position: self.spawn,
            rotation: self.facing.normalize(),
            ..MotionState::default()
        };

        let mut machine = CharacterMachine::with_motion(
            self.id.unwrap_or_default(),
            config,
            motion,
            animator,
        );
        machine.set_initial(self.initial);
        for observer in self.observers {
            machine.add_observer(observer);
        }

        Ok(machine)
    }
}

impl<A: AnimationSink> Default for CharacterBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}
