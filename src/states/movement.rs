//! Grounded walking.

use super::{steer, StateContext, TickEnv, TransitionRequest};
use crate::animation::{self, AnimationCue, MOVE_BLEND_PARAM};
use crate::core::{LocomotionState, TransitionCause};
use crate::input::{JumpIntents, JumpSubscription};
use crate::motion::{integrator, probe_ground};

/// Move owns the jump subscription for as long as it is active.
#[derive(Debug)]
pub struct MoveState {
    jump: JumpSubscription,
}

impl MoveState {
    pub(crate) fn enter(ctx: &mut StateContext<'_>) -> Self {
        ctx.motion.velocity.y = ctx.config.gravity;
        ctx.cross_fade(AnimationCue::Move);
        Self {
            jump: ctx.intents.subscribe(),
        }
    }

    pub(crate) fn resume(intents: &mut JumpIntents) -> Self {
        Self {
            jump: intents.subscribe(),
        }
    }

    pub fn jump_subscription(&self) -> &JumpSubscription {
        &self.jump
    }

    pub(crate) fn tick(
        &mut self,
        ctx: &mut StateContext<'_>,
        env: &TickEnv<'_>,
    ) -> Option<TransitionRequest> {
        let contact = probe_ground(env.world, ctx.motion.position, &ctx.config.probe);
        ctx.motion.is_grounded = contact.grounded;
        if !contact.grounded {
            return Some(TransitionRequest::to(
                LocomotionState::Fall,
                TransitionCause::LostGround,
            ));
        }

        steer(ctx, env);
        if contact.over_void {
            integrator::integrate_planar(ctx.motion, env.dt);
        } else {
            integrator::integrate(ctx.motion, env.world, &ctx.config.probe, env.dt);
        }

        let target = if env.input.has_walk() { 1.0 } else { 0.0 };
        ctx.motion.move_blend = animation::damp(
            ctx.motion.move_blend,
            target,
            ctx.config.blend_damp_time,
            env.dt,
        );
        ctx.animator.set_float(MOVE_BLEND_PARAM, ctx.motion.move_blend);

        None
    }

    pub(crate) fn exit(self, ctx: &mut StateContext<'_>) {
        ctx.intents.release(self.jump);
    }
}
