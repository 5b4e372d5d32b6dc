//! Typed configuration for the simulation, with reference defaults and validation.
//!
//! Every config is checked once at construction (`Simulation::new`) and again
//! whenever controls are hot-swapped, so the step loop never sees a
//! non-positive mass, speed cap or world extent.

use drive_common::{Real, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{WORLD_HALF_EXTENT, WORLD_RESTITUTION};

/// Errors raised when a configuration would make the simulation ill-defined
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("mass must be positive and finite, got {0}")]
    NonPositiveMass(Real),
    #[error("linear damping must lie in (0, 1], got {0}")]
    InvalidDamping(Real),
    #[error("control `{name}` must be positive and finite, got {value}")]
    NonPositiveControl { name: &'static str, value: Real },
    #[error("half extent must be positive and finite, got {0}")]
    NonPositiveHalfExtent(Real),
    #[error("restitution must lie in [0, 1), got {0}")]
    InvalidRestitution(Real),
    #[error("obstacle radius must be positive and finite, got {0}")]
    NonPositiveRadius(Real),
    #[error("camera blend factor must lie in (0, 1], got {0}")]
    InvalidBlend(Real),
    #[error("tick rate must be positive and finite, got {0} Hz")]
    InvalidTickRate(Real),
    #[error("frame interval must be non-zero")]
    ZeroFrameInterval,
    #[error("cannot scatter {requested} obstacles, at most {max} allowed")]
    TooManyObstacles { requested: usize, max: usize },
    #[error("`{0}` must be finite")]
    NonFinite(&'static str),
}

#[inline]
fn positive(value: Real) -> bool {
    value.is_finite() && value > 0.0
}

/// Mass, damping and spawn point of the vehicle body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyConfig {
    pub mass: Real,
    pub linear_damping: Real,
    pub spawn: Vec3,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            mass: 5.0,
            linear_damping: 0.96,
            spawn: Vec3::new(0.0, 0.5, 0.0),
        }
    }
}

impl BodyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.mass) {
            return Err(ConfigError::NonPositiveMass(self.mass));
        }
        if !(self.linear_damping > 0.0 && self.linear_damping <= 1.0) {
            return Err(ConfigError::InvalidDamping(self.linear_damping));
        }
        if !self.spawn.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::NonFinite("spawn"));
        }
        Ok(())
    }
}

/// Runtime-tunable driving controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Forward thrust force
    pub acceleration: Real,
    /// Angular velocity added per second of held turn key
    pub turn_speed: Real,
    /// Speed cap enforced after integration
    pub max_speed: Real,
    /// Per-tick velocity multiplier while braking
    pub brake_factor: Real,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            acceleration: 200.0,
            turn_speed: 4.5,
            max_speed: 80.0,
            brake_factor: 0.80,
        }
    }
}

impl ControlConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("acceleration", self.acceleration),
            ("turn_speed", self.turn_speed),
            ("max_speed", self.max_speed),
            ("brake_factor", self.brake_factor),
        ];
        for (name, value) in fields {
            if !positive(value) {
                return Err(ConfigError::NonPositiveControl { name, value });
            }
        }
        Ok(())
    }

    /// Overlay a partial update and validate the result
    pub fn merged(&self, patch: &ControlPatch) -> Result<ControlConfig, ConfigError> {
        let merged = ControlConfig {
            acceleration: patch.acceleration.unwrap_or(self.acceleration),
            turn_speed: patch.turn_speed.unwrap_or(self.turn_speed),
            max_speed: patch.max_speed.unwrap_or(self.max_speed),
            brake_factor: patch.brake_factor.unwrap_or(self.brake_factor),
        };
        merged.validate()?;
        Ok(merged)
    }
}

/// Partial control update; absent fields keep their current value
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlPatch {
    pub acceleration: Option<Real>,
    pub turn_speed: Option<Real>,
    pub max_speed: Option<Real>,
    pub brake_factor: Option<Real>,
}

impl ControlPatch {
    pub fn is_empty(&self) -> bool {
        *self == ControlPatch::default()
    }
}

/// Square world extent and the bounce-back applied at its edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryConfig {
    pub half_extent: Real,
    pub restitution: Real,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            half_extent: WORLD_HALF_EXTENT,
            restitution: WORLD_RESTITUTION,
        }
    }
}

impl BoundaryConfig {
    pub fn new(half_extent: Real, restitution: Real) -> Result<Self, ConfigError> {
        let config = Self { half_extent, restitution };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.half_extent) {
            return Err(ConfigError::NonPositiveHalfExtent(self.half_extent));
        }
        if !(self.restitution >= 0.0 && self.restitution < 1.0) {
            return Err(ConfigError::InvalidRestitution(self.restitution));
        }
        Ok(())
    }
}

/// Chase-camera parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Vehicle-local offset (0, height, back)
    pub offset: Vec3,
    /// Height of the look-at point above the vehicle origin
    pub look_height: Real,
    /// Exponential smoothing factor per tick
    pub blend: Real,
    pub initial_position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 10.0, 18.0),
            look_height: 2.0,
            blend: 0.15,
            initial_position: Vec3::new(0.0, 15.0, 25.0),
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.blend > 0.0 && self.blend <= 1.0) {
            return Err(ConfigError::InvalidBlend(self.blend));
        }
        if !self.offset.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::NonFinite("camera offset"));
        }
        if !self.initial_position.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::NonFinite("camera position"));
        }
        if !self.look_height.is_finite() {
            return Err(ConfigError::NonFinite("look height"));
        }
        Ok(())
    }
}
