//! Locomotion state behavior.
//!
//! Each state is a policy with three hooks:
//!
//! 1. `enter` - once, right after the previous state's `exit` completed
//! 2. `tick` - once per simulation step while active; may request a transition
//! 3. `exit` - once, before the next state is entered
//!
//! States never switch the machine themselves. `tick` returns a
//! [`TransitionRequest`] and the machine performs `exit`/`enter`, which keeps
//! the hook ordering in a single place.

mod fall;
mod jump;
mod movement;

pub use fall::FallState;
pub use jump::JumpState;
pub use movement::MoveState;

use crate::animation::{AnimationCue, AnimationSink};
use crate::config::MotionConfig;
use crate::core::{LocomotionState, TransitionCause};
use crate::input::{JumpIntents, MoveInput};
use crate::motion::{GroundQuery, MotionState};

/// Mutable collaborators a state may touch.
pub(crate) struct StateContext<'a> {
    pub motion: &'a mut MotionState,
    pub config: &'a MotionConfig,
    pub intents: &'a mut JumpIntents,
    pub animator: &'a mut dyn AnimationSink,
}

impl StateContext<'_> {
    pub(crate) fn cross_fade(&mut self, cue: AnimationCue) {
        self.animator.cross_fade(cue, self.config.cross_fade_duration);
    }
}

/// Per-tick inputs.
pub(crate) struct TickEnv<'a> {
    pub dt: f32,
    pub input: &'a MoveInput,
    pub world: &'a dyn GroundQuery,
}

/// A state asking the machine to switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRequest {
    pub next: LocomotionState,
    pub cause: TransitionCause,
}

impl TransitionRequest {
    pub fn to(next: LocomotionState, cause: TransitionCause) -> Self {
        Self { next, cause }
    }
}

/// The active state together with the data it owns while active.
#[derive(Debug)]
pub enum ActiveState {
    Move(MoveState),
    Jump(JumpState),
    Fall(FallState),
}

impl ActiveState {
    /// Run the entry hook of `state` and return it active.
    pub(crate) fn enter(state: LocomotionState, ctx: &mut StateContext<'_>) -> Self {
        match state {
            LocomotionState::Move => Self::Move(MoveState::enter(ctx)),
            LocomotionState::Jump => Self::Jump(JumpState::enter(ctx)),
            LocomotionState::Fall => Self::Fall(FallState::enter(ctx)),
        }
    }

    /// Reactivate `state` from a checkpoint.
    ///
    /// Reacquires owned resources (Move's jump subscription) without
    /// replaying entry side effects on the motion state or the animator.
    pub(crate) fn resume(state: LocomotionState, intents: &mut JumpIntents) -> Self {
        match state {
            LocomotionState::Move => Self::Move(MoveState::resume(intents)),
            LocomotionState::Jump => Self::Jump(JumpState),
            LocomotionState::Fall => Self::Fall(FallState),
        }
    }

    pub(crate) fn tick(
        &mut self,
        ctx: &mut StateContext<'_>,
        env: &TickEnv<'_>,
    ) -> Option<TransitionRequest> {
        match self {
            Self::Move(state) => state.tick(ctx, env),
            Self::Jump(state) => state.tick(ctx, env),
            Self::Fall(state) => state.tick(ctx, env),
        }
    }

    pub(crate) fn exit(self, ctx: &mut StateContext<'_>) {
        match self {
            Self::Move(state) => state.exit(ctx),
            Self::Jump(state) => state.exit(ctx),
            Self::Fall(state) => state.exit(ctx),
        }
    }

    pub fn kind(&self) -> LocomotionState {
        match self {
            Self::Move(_) => LocomotionState::Move,
            Self::Jump(_) => LocomotionState::Jump,
            Self::Fall(_) => LocomotionState::Fall,
        }
    }
}

/// Shared steering used by Move and Jump: face the walk direction and set
/// horizontal velocity from it.
pub(crate) fn steer(ctx: &mut StateContext<'_>, env: &TickEnv<'_>) {
    use crate::motion::integrator;

    let direction = env.input.direction();
    integrator::face_towards(
        ctx.motion,
        direction,
        ctx.config.look_rotation_damp_factor,
        env.dt,
    );
    integrator::set_horizontal_velocity(ctx.motion, direction * ctx.config.move_speed);
}
