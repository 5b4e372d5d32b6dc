use drive_common::{Snapshot, Vec3};
use log::info;

use crate::camera::CameraRig;
use crate::config::{BodyConfig, BoundaryConfig, CameraConfig, ConfigError};
use crate::store::GameStore;
use crate::world::{ObstacleField, WorldSetup};

pub mod body;
pub mod boundary;
pub mod collision;
pub mod contact_tracker;
pub mod physics_tick;
pub mod prelude;

pub use body::PhysicsBody;
pub use contact_tracker::{ContactLog, ContactRecord};
pub use physics_tick::{sanitize_dt, StepReport};

#[cfg(test)]
mod tests;

/// Everything the step loop mutates: the vehicle, its camera and contact log,
/// plus the static world they move through
#[derive(Debug, Clone)]
pub struct Simulation {
    body: PhysicsBody,
    body_config: BodyConfig,
    world: WorldSetup,
    camera: CameraRig,
    contacts: ContactLog,
    tick: u64,
}

impl Simulation {
    /// Build a simulation; any invalid config fails construction
    pub fn new(body_config: BodyConfig, camera_config: CameraConfig, world: WorldSetup) -> Result<Self, ConfigError> {
        world.boundary.validate()?;
        let body = PhysicsBody::new(&body_config)?;
        let camera = CameraRig::new(camera_config)?;
        info!(
            "Simulation created: mass {}, damping {}, {} obstacles, half extent {}",
            body.mass(),
            body.linear_damping(),
            world.obstacles.len(),
            world.boundary.half_extent
        );
        Ok(Self {
            body,
            body_config,
            world,
            camera,
            contacts: ContactLog::default(),
            tick: 0,
        })
    }

    /// Reference vehicle, camera and 16-tree world
    pub fn reference() -> Result<Self, ConfigError> {
        Self::new(BodyConfig::default(), CameraConfig::default(), WorldSetup::reference())
    }

    pub fn body(&self) -> &PhysicsBody {
        &self.body
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn obstacles(&self) -> &ObstacleField {
        &self.world.obstacles
    }

    pub fn boundary(&self) -> &BoundaryConfig {
        &self.world.boundary
    }

    pub fn contacts(&self) -> &ContactLog {
        &self.contacts
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Replace the body and camera wholesale and clear session state.
    ///
    /// Obstacles and controls are kept.
    pub fn reset(&mut self, store: &mut GameStore) -> Result<(), ConfigError> {
        self.body = PhysicsBody::new(&self.body_config)?;
        self.camera.reset();
        self.contacts.clear();
        store.reset_session();
        info!("Simulation reset at tick {}", self.tick);
        Ok(())
    }

    /// Render-facing view of the current state
    pub fn snapshot(&self, store: &GameStore) -> Snapshot {
        Snapshot {
            tick: self.tick,
            position: to_array(&self.body.position),
            heading: self.body.heading,
            speed: self.body.speed(),
            camera_position: to_array(&self.camera.position()),
            camera_target: to_array(&self.camera.look_at()),
            paused: store.paused(),
        }
    }
}

fn to_array(v: &Vec3) -> [drive_common::Real; 3] {
    [v.x, v.y, v.z]
}
