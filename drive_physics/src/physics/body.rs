use drive_common::types::{forward_axis, heading_rotation};
use drive_common::{Real, Vec3};
use rapier3d::na::{Isometry3, Translation3};

use crate::config::{BodyConfig, ConfigError};
use crate::constants::ANGULAR_DAMPING;

/// Kinematic state of the vehicle and its integration step
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBody {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Transient force accumulator, cleared by every `integrate` call
    acceleration: Vec3,
    /// Yaw rate in rad/s
    pub angular_velocity: Real,
    /// Rotation about +Y in radians
    pub heading: Real,
    mass: Real,
    linear_damping: Real,
}

impl PhysicsBody {
    pub fn new(config: &BodyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            position: config.spawn,
            velocity: Vec3::zeros(),
            acceleration: Vec3::zeros(),
            angular_velocity: 0.0,
            heading: 0.0,
            mass: config.mass,
            linear_damping: config.linear_damping,
        })
    }

    pub fn mass(&self) -> Real {
        self.mass
    }

    pub fn linear_damping(&self) -> Real {
        self.linear_damping
    }

    /// Pending acceleration for the next integration
    pub fn accumulated_acceleration(&self) -> Vec3 {
        self.acceleration
    }

    /// Add `force / mass` to the accumulator; additive and order-independent
    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force / self.mass;
    }

    /// Advance the body by `dt` seconds.
    ///
    /// Damping is applied per call, not per second, so the decay rate depends
    /// on the frame rate. A `dt` that is not finite and positive only clears
    /// the accumulator.
    pub fn integrate(&mut self, dt: Real) {
        if dt.is_finite() && dt > 0.0 {
            self.velocity += self.acceleration * dt;
            self.velocity *= self.linear_damping;

            self.position += self.velocity * dt;

            self.heading += self.angular_velocity * dt;
            self.angular_velocity *= ANGULAR_DAMPING;
        }
        self.acceleration = Vec3::zeros();
    }

    pub fn speed(&self) -> Real {
        self.velocity.norm()
    }

    /// Rescale velocity so its magnitude does not exceed `max_speed`
    pub fn clamp_speed(&mut self, max_speed: Real) -> bool {
        let speed = self.speed();
        if speed > max_speed {
            self.velocity = self.velocity / speed * max_speed;
            true
        } else {
            false
        }
    }

    /// World-space forward axis for the current heading
    pub fn forward(&self) -> Vec3 {
        forward_axis(self.heading)
    }

    /// Full transform handed to render collaborators
    pub fn isometry(&self) -> Isometry3<Real> {
        Isometry3::from_parts(
            Translation3::from(self.position),
            heading_rotation(self.heading),
        )
    }
}
