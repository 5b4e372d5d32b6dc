//! Maps held logical keys onto forces and turn impulses for the body

use drive_common::{HeldKeys, LogicalKey, Real};

use crate::config::ControlConfig;
use crate::constants::REVERSE_RATIO;
use crate::physics::PhysicsBody;

/// Apply one tick of driver input to `body`.
///
/// Thrust follows the forward axis of the current heading. Turning adds
/// directly to the yaw rate, scaled by `dt`. Braking multiplies velocity by
/// `brake_factor` once per tick regardless of `dt`.
pub fn apply_input(body: &mut PhysicsBody, keys: HeldKeys, controls: &ControlConfig, dt: Real) {
    let forward = body.forward();

    if keys.is_held(LogicalKey::Forward) {
        body.apply_force(forward * controls.acceleration);
    }
    if keys.is_held(LogicalKey::Backward) {
        body.apply_force(forward * (-controls.acceleration * REVERSE_RATIO));
    }
    if keys.is_held(LogicalKey::TurnLeft) {
        body.angular_velocity += controls.turn_speed * dt;
    }
    if keys.is_held(LogicalKey::TurnRight) {
        body.angular_velocity -= controls.turn_speed * dt;
    }
    if keys.is_held(LogicalKey::Brake) {
        body.velocity *= controls.brake_factor;
    }
}
