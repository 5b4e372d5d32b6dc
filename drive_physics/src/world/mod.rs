pub mod obstacle_field;
pub mod setup;

pub use obstacle_field::{Obstacle, ObstacleField};
pub use setup::WorldSetup;
