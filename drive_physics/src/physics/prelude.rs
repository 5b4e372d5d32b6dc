//! Common imports for hosts driving the simulation
pub use drive_common::{HeldKeys, LogicalKey, ObstacleId, ObstacleLayout, Real, Snapshot, Vec2, Vec3};

pub use crate::config::{BodyConfig, BoundaryConfig, CameraConfig, ConfigError, ControlConfig, ControlPatch};
pub use crate::physics::{Simulation, StepReport};
pub use crate::schedule::{CancelToken, FrameLoop};
pub use crate::store::GameStore;
pub use crate::world::WorldSetup;
