//! Airborne descent.

use super::{StateContext, TickEnv, TransitionRequest};
use crate::animation::AnimationCue;
use crate::core::{LocomotionState, TransitionCause};
use crate::motion::{integrator, probe_ground};

#[derive(Debug)]
pub struct FallState;

impl FallState {
    pub(crate) fn enter(ctx: &mut StateContext<'_>) -> Self {
        ctx.motion.velocity.y = 0.0;
        ctx.cross_fade(AnimationCue::Fall);
        Self
    }

    /// Horizontal momentum is kept; there is no air control while falling.
    pub(crate) fn tick(
        &mut self,
        ctx: &mut StateContext<'_>,
        env: &TickEnv<'_>,
    ) -> Option<TransitionRequest> {
        integrator::apply_gravity(ctx.motion, ctx.config.gravity, env.dt);
        integrator::integrate(ctx.motion, env.world, &ctx.config.probe, env.dt);

        let contact = probe_ground(env.world, ctx.motion.position, &ctx.config.probe);
        ctx.motion.is_grounded = contact.grounded;
        contact.grounded.then(|| {
            TransitionRequest::to(LocomotionState::Move, TransitionCause::Grounded)
        })
    }

    pub(crate) fn exit(self, _ctx: &mut StateContext<'_>) {}
}
