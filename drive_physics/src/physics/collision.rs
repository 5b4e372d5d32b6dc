//! Obstacle overlap test and positional correction

use drive_common::types::ground_xz;
use drive_common::{Real, Vec2, Vec3};

use crate::constants::COLLISION_VELOCITY_SCALE;

/// Separations below this are treated as coincident centers
const DEGENERATE_DISTANCE: Real = 1e-6;

/// Outcome of testing one obstacle against the body state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub collided: bool,
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Push direction used when the body sits exactly on an obstacle center (+z)
#[inline]
pub fn fallback_direction() -> Vec2 {
    Vec2::new(0.0, 1.0)
}

/// Resolve a single obstacle against the body's position and velocity.
///
/// Distance is measured on the ground plane. On overlap the body is moved to
/// the contact shell (exactly `min_distance` from `center`, height unchanged)
/// and its velocity is reversed and damped on every axis.
pub fn resolve_obstacle(position: Vec3, velocity: Vec3, center: Vec2, min_distance: Real) -> Resolution {
    let offset = ground_xz(&position) - center;
    let distance = offset.norm();
    if distance >= min_distance {
        return Resolution { collided: false, position, velocity };
    }

    let direction = if distance > DEGENERATE_DISTANCE {
        offset / distance
    } else {
        fallback_direction()
    };
    let shell = center + direction * min_distance;

    Resolution {
        collided: true,
        position: Vec3::new(shell.x, position.y, shell.y),
        velocity: velocity * COLLISION_VELOCITY_SCALE,
    }
}
