/**
 * Arcade vehicle simulation core
 *
 * A single body on a flat ground plane, driven by held keys, pushed out of
 * cylindrical tree obstacles and kept inside a square world. A chase camera
 * trails it with exponential smoothing. Hosts own a `GameStore` and a
 * `Simulation`, and call `Simulation::step` once per frame, typically from a
 * `FrameLoop`.
 */

pub mod camera;
pub mod config;
pub mod constants;
pub mod input;
pub mod physics;
pub mod schedule;
pub mod store;
pub mod world;

pub use physics::prelude;

pub use camera::CameraRig;
pub use config::{BodyConfig, BoundaryConfig, CameraConfig, ConfigError, ControlConfig, ControlPatch};
pub use physics::{PhysicsBody, Simulation, StepReport};
pub use schedule::{CancelToken, FrameLoop};
pub use store::GameStore;
pub use world::{Obstacle, ObstacleField, WorldSetup};
