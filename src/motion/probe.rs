//! Ground probing.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::world::{GroundQuery, RayHit};
use crate::config::GroundProbeConfig;

/// Outcome of a ground probe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundContact {
    /// Whether the character counts as supported.
    pub grounded: bool,

    /// Surface found by the short ground ray, if any.
    pub hit: Option<RayHit>,

    /// Nothing lies below within the void probe's reach.
    ///
    /// A character over the void is reported as grounded so it never falls
    /// forever through a world with no floor.
    pub over_void: bool,
}

/// Probe for ground beneath a character standing at `position` (feet).
///
/// Casts a short ray from just above the feet. When it misses, a long ray
/// checks whether anything exists below at all. The result depends only on
/// the world and the position.
pub fn probe_ground<W: GroundQuery + ?Sized>(
    world: &W,
    position: Vec3,
    config: &GroundProbeConfig,
) -> GroundContact {
    let origin = position + Vec3::Y * config.origin_offset;

    if let Some(hit) = world.raycast(origin, Vec3::NEG_Y, config.ground_reach()) {
        return GroundContact {
            grounded: true,
            hit: Some(hit),
            over_void: false,
        };
    }

    let over_void = world
        .raycast(origin, Vec3::NEG_Y, config.void_distance)
        .is_none();

    GroundContact {
        grounded: over_void,
        hit: None,
        over_void,
    }
}
