//! Shared vocabulary between the simulation core and its hosts
//! (vector types, heading helpers, held-key masks, obstacle layouts, snapshots)

pub mod types;
pub mod keys;
pub mod layout;

pub use keys::{HeldKeys, LogicalKey};
pub use layout::{LayoutParseError, ObstacleLayout};
pub use types::{ObstacleId, Real, Snapshot, Vec2, Vec3};
