//! Chase camera that trails the vehicle with exponential smoothing

use drive_common::types::rotate_by_heading;
use drive_common::{Real, Vec3};
use rapier3d::na::{Isometry3, Point3, UnitQuaternion};

use crate::config::{CameraConfig, ConfigError};

/// Below this eye-to-target distance the orientation is left as is
const MIN_LOOK_DISTANCE: Real = 1e-4;

#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    config: CameraConfig,
    position: Vec3,
    look_at: Vec3,
    orientation: UnitQuaternion<Real>,
}

impl CameraRig {
    pub fn new(config: CameraConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rig = Self {
            config,
            position: config.initial_position,
            look_at: Vec3::new(0.0, config.look_height, 0.0),
            orientation: UnitQuaternion::identity(),
        };
        rig.refresh_orientation();
        Ok(rig)
    }

    /// Smoothed camera position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Point the camera looks at this tick (never smoothed)
    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    /// Camera-to-world rotation; the camera looks down its local -Z
    pub fn orientation(&self) -> UnitQuaternion<Real> {
        self.orientation
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Where the camera wants to be for a vehicle at `position` facing `heading`
    pub fn target_position(&self, position: &Vec3, heading: Real) -> Vec3 {
        position + rotate_by_heading(heading, self.config.offset)
    }

    /// Advance the smoothing filter by one tick
    pub fn update(&mut self, vehicle_position: &Vec3, heading: Real) {
        let target = self.target_position(vehicle_position, heading);
        self.position = self.position.lerp(&target, self.config.blend);
        self.look_at = vehicle_position + Vec3::new(0.0, self.config.look_height, 0.0);
        self.refresh_orientation();
    }

    /// Jump back to the configured starting viewpoint
    pub fn reset(&mut self) {
        self.position = self.config.initial_position;
        self.look_at = Vec3::new(0.0, self.config.look_height, 0.0);
        self.refresh_orientation();
    }

    fn refresh_orientation(&mut self) {
        let dir = self.look_at - self.position;
        if dir.norm() < MIN_LOOK_DISTANCE {
            return;
        }
        let up = Vec3::y();
        // looking straight up or down leaves the roll undefined
        if dir.normalize().cross(&up).norm() < MIN_LOOK_DISTANCE {
            return;
        }
        let view = Isometry3::look_at_rh(&Point3::from(self.position), &Point3::from(self.look_at), &up);
        self.orientation = view.inverse().rotation;
    }
}
