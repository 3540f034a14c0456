//! Rising after a jump impulse.

use super::{steer, StateContext, TickEnv, TransitionRequest};
use crate::animation::AnimationCue;
use crate::core::{LocomotionState, TransitionCause};
use crate::motion::integrator;

#[derive(Debug)]
pub struct JumpState;

impl JumpState {
    pub(crate) fn enter(ctx: &mut StateContext<'_>) -> Self {
        ctx.motion.velocity.y = ctx.config.jump_force;
        ctx.motion.is_grounded = false;
        ctx.cross_fade(AnimationCue::Jump);
        Self
    }

    pub(crate) fn tick(
        &mut self,
        ctx: &mut StateContext<'_>,
        env: &TickEnv<'_>,
    ) -> Option<TransitionRequest> {
        integrator::apply_gravity(ctx.motion, ctx.config.gravity, env.dt);
        if ctx.motion.velocity.y <= 0.0 {
            return Some(TransitionRequest::to(
                LocomotionState::Fall,
                TransitionCause::Apex,
            ));
        }

        steer(ctx, env);
        integrator::integrate(ctx.motion, env.world, &ctx.config.probe, env.dt);
        None
    }

    pub(crate) fn exit(self, _ctx: &mut StateContext<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MoveInput;
    use crate::motion::{MotionState, StaticWorld};
    use crate::states::test_support::Harness;
    use glam::{Vec2, Vec3};

    #[test]
    fn enter_applies_impulse_and_keeps_horizontal() {
        let mut harness = Harness::new(MotionState {
            velocity: Vec3::new(2.0, -9.8, -1.0),
            is_grounded: true,
            ..MotionState::default()
        });

        JumpState::enter(&mut harness.ctx());

        assert_eq!(harness.motion.velocity, Vec3::new(2.0, 5.0, -1.0));
        assert!(!harness.motion.is_grounded);
        assert_eq!(harness.animator.cues(), vec![AnimationCue::Jump]);
    }

    #[test]
    fn apex_requests_fall() {
        let world = StaticWorld::new().with_floor(0.0, 10.0);
        let mut harness = Harness::new(MotionState::default());
        let mut state = JumpState::enter(&mut harness.ctx());
        let input = MoveInput::idle();
        let env = TickEnv {
            dt: 0.02,
            input: &input,
            world: &world,
        };

        // 5.0 / (9.8 * 0.02) = 25.5 ticks of rising.
        for tick in 1..=25 {
            assert!(
                state.tick(&mut harness.ctx(), &env).is_none(),
                "requested fall early at tick {tick}"
            );
        }
        assert!(harness.motion.position.y > 1.0);

        let request = state.tick(&mut harness.ctx(), &env);
        assert_eq!(
            request,
            Some(TransitionRequest::to(
                LocomotionState::Fall,
                TransitionCause::Apex
            ))
        );
        assert!(harness.motion.velocity.y <= 0.0);
    }

    #[test]
    fn jump_steers_horizontally() {
        let world = StaticWorld::new();
        let mut harness = Harness::new(MotionState::default());
        let mut state = JumpState::enter(&mut harness.ctx());
        let input = MoveInput::new(Vec2::new(0.0, 1.0));

        state.tick(
            &mut harness.ctx(),
            &TickEnv {
                dt: 0.1,
                input: &input,
                world: &world,
            },
        );

        assert!((harness.motion.velocity.z - harness.config.move_speed).abs() < 1e-6);
        assert!(harness.motion.position.z > 0.0);
        assert!(harness.motion.position.y > 0.0);
    }
}
