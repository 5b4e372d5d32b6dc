//! Square world containment

use drive_common::{Real, Vec3};

use crate::config::BoundaryConfig;

/// Horizontal axes that were clamped during one containment pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundaryHits {
    pub x: bool,
    pub z: bool,
}

impl BoundaryHits {
    pub fn any(&self) -> bool {
        self.x || self.z
    }
}

/// Clamp one coordinate and bounce its velocity component; true when clamped
#[inline]
fn contain_axis(coord: &mut Real, vel: &mut Real, half_extent: Real, restitution: Real) -> bool {
    if coord.abs() > half_extent {
        *coord = coord.signum() * half_extent;
        *vel *= -restitution;
        true
    } else {
        false
    }
}

/// Keep the body inside `[-half_extent, half_extent]` on x and z.
///
/// Each axis is handled on its own, so a corner crossing clamps both.
pub fn contain(position: &mut Vec3, velocity: &mut Vec3, config: &BoundaryConfig) -> BoundaryHits {
    BoundaryHits {
        x: contain_axis(&mut position.x, &mut velocity.x, config.half_extent, config.restitution),
        z: contain_axis(&mut position.z, &mut velocity.z, config.half_extent, config.restitution),
    }
}
