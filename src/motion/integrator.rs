//! Velocity and pose integration.

use glam::{Quat, Vec3};

use super::world::{GroundQuery, RayHit};
use super::MotionState;
use crate::config::GroundProbeConfig;

/// Apply `velocity * dt` to the position.
///
/// When the step descends, a ray swept from the pre-step height clamps the
/// position to the first surface crossed. This keeps a grounded character on
/// its floor and stops a fast fall from tunnelling through thin geometry.
/// The clamp never lifts the character above its pre-step height, so a step
/// into a solid box holds height instead of climbing it.
/// Returns the surface landed on, if any.
pub fn integrate<W: GroundQuery + ?Sized>(
    motion: &mut MotionState,
    world: &W,
    probe: &GroundProbeConfig,
    dt: f32,
) -> Option<RayHit> {
    let start = motion.position;
    let mut end = start + motion.velocity * dt;
    let mut landed = None;

    if end.y < start.y {
        let origin = Vec3::new(end.x, start.y + probe.origin_offset, end.z);
        let reach = probe.origin_offset + (start.y - end.y);
        if let Some(hit) = world.raycast(origin, Vec3::NEG_Y, reach) {
            if end.y < hit.point.y {
                end.y = hit.point.y.min(start.y);
                landed = Some(hit);
            }
        }
    }

    motion.position = end;
    landed
}

/// Apply only the horizontal part of `velocity * dt`.
///
/// Used while the void guard reports ground that does not exist: there is
/// nothing to stand on and nothing to fall onto, so height is held.
pub fn integrate_planar(motion: &mut MotionState, dt: f32) {
    motion.position.x += motion.velocity.x * dt;
    motion.position.z += motion.velocity.z * dt;
}

/// Semi-implicit gravity step on the vertical velocity.
pub fn apply_gravity(motion: &mut MotionState, gravity: f32, dt: f32) {
    motion.velocity.y += gravity * dt;
}

/// Replace the horizontal velocity, leaving the vertical component alone.
pub fn set_horizontal_velocity(motion: &mut MotionState, horizontal: Vec3) {
    motion.velocity.x = horizontal.x;
    motion.velocity.z = horizontal.z;
}

/// Yaw-only rotation whose forward (+Z) axis points along `direction`.
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(Quat::from_rotation_y(flat.x.atan2(flat.z)))
}

/// Turn the facing toward `direction`, damped by `damp_factor * dt`.
///
/// A zero direction leaves the facing untouched.
pub fn face_towards(motion: &mut MotionState, direction: Vec3, damp_factor: f32, dt: f32) {
    let Some(target) = look_rotation(direction) else {
        return;
    };
    let t = (damp_factor * dt).clamp(0.0, 1.0);
    motion.rotation = motion.rotation.slerp(target, t).normalize();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::StaticWorld;

    fn motion_at(position: Vec3, velocity: Vec3) -> MotionState {
        MotionState {
            position,
            velocity,
            ..MotionState::default()
        }
    }

    #[test]
    fn integrate_applies_velocity() {
        let world = StaticWorld::new();
        let mut motion = motion_at(Vec3::ZERO, Vec3::new(2.0, 1.0, -4.0));

        let landed = integrate(&mut motion, &world, &GroundProbeConfig::default(), 0.5);

        assert!(landed.is_none());
        assert_eq!(motion.position, Vec3::new(1.0, 0.5, -2.0));
    }

    #[test]
    fn integrate_clamps_to_floor() {
        let world = StaticWorld::new().with_floor(0.0, 10.0);
        let mut motion = motion_at(Vec3::new(0.0, 0.05, 0.0), Vec3::new(0.0, -9.81, 0.0));

        let landed = integrate(&mut motion, &world, &GroundProbeConfig::default(), 0.02);

        assert!(landed.is_some());
        assert_eq!(motion.position.y, 0.0);
    }

    #[test]
    fn fast_fall_does_not_tunnel() {
        let world = StaticWorld::new().with_box(crate::motion::Aabb::new(
            Vec3::new(-5.0, -0.1, -5.0),
            Vec3::new(5.0, 0.0, 5.0),
        ));
        let mut motion = motion_at(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -200.0, 0.0));

        integrate(&mut motion, &world, &GroundProbeConfig::default(), 0.02);

        assert_eq!(motion.position.y, 0.0);
    }

    #[test]
    fn stepping_into_a_tall_box_never_lifts() {
        let world = StaticWorld::new()
            .with_floor(0.0, 10.0)
            .with_box(crate::motion::Aabb::new(
                Vec3::new(1.0, 0.0, -5.0),
                Vec3::new(3.0, 2.0, 5.0),
            ));
        let mut motion = motion_at(Vec3::new(0.9, 0.0, 0.0), Vec3::new(3.0, -9.8, 0.0));

        for _ in 0..40 {
            let before = motion.position.y;
            integrate(&mut motion, &world, &GroundProbeConfig::default(), 0.02);
            assert!(motion.position.y <= before);
        }
        assert!(motion.position.x > 3.0);
        assert_eq!(motion.position.y, 0.0);
    }

    #[test]
    fn rising_is_never_clamped() {
        let world = StaticWorld::new().with_floor(0.0, 10.0);
        let mut motion = motion_at(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0));

        integrate(&mut motion, &world, &GroundProbeConfig::default(), 0.1);

        assert!((motion.position.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn planar_integration_holds_height() {
        let mut motion = motion_at(Vec3::new(0.0, 7.0, 0.0), Vec3::new(1.0, -9.8, 2.0));
        integrate_planar(&mut motion, 0.5);
        assert_eq!(motion.position, Vec3::new(0.5, 7.0, 1.0));
    }

    #[test]
    fn gravity_accumulates() {
        let mut motion = MotionState::default();
        apply_gravity(&mut motion, -10.0, 0.1);
        apply_gravity(&mut motion, -10.0, 0.1);
        assert!((motion.velocity.y + 2.0).abs() < 1e-6);
    }

    #[test]
    fn horizontal_velocity_keeps_vertical() {
        let mut motion = motion_at(Vec3::ZERO, Vec3::new(0.0, -3.0, 0.0));
        set_horizontal_velocity(&mut motion, Vec3::new(1.0, 99.0, 2.0));
        assert_eq!(motion.velocity, Vec3::new(1.0, -3.0, 2.0));
    }

    #[test]
    fn look_rotation_points_forward_along_direction() {
        let rotation = look_rotation(Vec3::X).unwrap();
        let forward = rotation * Vec3::Z;
        assert!(forward.abs_diff_eq(Vec3::X, 1e-5));

        assert!(look_rotation(Vec3::Y).is_none());
    }

    #[test]
    fn face_towards_is_damped() {
        let mut motion = MotionState::default();
        face_towards(&mut motion, Vec3::X, 5.0, 0.02);

        let forward = motion.rotation * Vec3::Z;
        // Ten percent of the way round a quarter turn.
        assert!(forward.x > 0.0 && forward.x < 0.5);

        for _ in 0..200 {
            face_towards(&mut motion, Vec3::X, 5.0, 0.02);
        }
        assert!((motion.rotation * Vec3::Z).abs_diff_eq(Vec3::X, 1e-3));
    }

    #[test]
    fn face_towards_ignores_zero_direction() {
        let mut motion = MotionState::default();
        face_towards(&mut motion, Vec3::ZERO, 5.0, 0.02);
        assert_eq!(motion.rotation, Quat::IDENTITY);
    }
}
