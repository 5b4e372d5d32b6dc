use drive_common::{ObstacleLayout, Real, Vec2};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{BoundaryConfig, ConfigError};
use crate::constants::{MAX_SCATTER_COUNT, TREE_RADIUS};
use crate::world::ObstacleField;

/// Rejection-sampling attempts allowed per requested obstacle
const SCATTER_ATTEMPTS_PER_OBSTACLE: usize = 64;

/// Static world handed to the simulation at startup: obstacles and extent
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSetup {
    pub obstacles: ObstacleField,
    pub boundary: BoundaryConfig,
}

impl WorldSetup {
    /// Reference world: 16 trees inside a 95-unit half extent
    pub fn reference() -> Self {
        Self {
            obstacles: Self::field_or_empty(&ObstacleLayout::reference()),
            boundary: BoundaryConfig::default(),
        }
    }

    /// Arbitrary layout with uniform tree radius
    pub fn from_layout(layout: &ObstacleLayout, radius: Real, boundary: BoundaryConfig) -> Result<Self, ConfigError> {
        boundary.validate()?;
        let obstacles = ObstacleField::from_layout(layout, radius)?;
        info!("World setup: {} obstacles, half extent {}", obstacles.len(), boundary.half_extent);
        Ok(Self { obstacles, boundary })
    }

    /// Seeded random layout of `count` trees.
    ///
    /// Trees stay inside the boundary, do not overlap each other and keep
    /// `clear_radius` free around the origin so the vehicle never spawns inside
    /// one. The same seed always yields the same layout. Counts above
    /// `MAX_SCATTER_COUNT` are rejected.
    pub fn scattered(seed: u64, count: usize, clear_radius: Real, boundary: BoundaryConfig) -> Result<Self, ConfigError> {
        boundary.validate()?;
        if count > MAX_SCATTER_COUNT {
            return Err(ConfigError::TooManyObstacles { requested: count, max: MAX_SCATTER_COUNT });
        }
        let limit = (boundary.half_extent - TREE_RADIUS).max(0.0);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut positions: Vec<Vec2> = Vec::new();

        let budget = count.saturating_mul(SCATTER_ATTEMPTS_PER_OBSTACLE);
        let mut attempts = 0;
        while positions.len() < count && attempts < budget {
            attempts += 1;
            let candidate = if limit > 0.0 {
                Vec2::new(rng.random_range(-limit..limit), rng.random_range(-limit..limit))
            } else {
                Vec2::zeros()
            };
            if candidate.norm() < clear_radius + TREE_RADIUS {
                continue;
            }
            if positions.iter().any(|p| (p - candidate).norm() < 2.0 * TREE_RADIUS) {
                continue;
            }
            positions.push(candidate);
        }

        if positions.len() < count {
            warn!("Scatter placed only {} of {} obstacles (seed {})", positions.len(), count, seed);
        }
        Self::from_layout(&ObstacleLayout { positions }, TREE_RADIUS, boundary)
    }

    fn field_or_empty(layout: &ObstacleLayout) -> ObstacleField {
        // TREE_RADIUS is positive
        ObstacleField::from_layout(layout, TREE_RADIUS).unwrap_or_default()
    }
}

impl Default for WorldSetup {
    fn default() -> Self {
        Self::reference()
    }
}
