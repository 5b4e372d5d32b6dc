use drive_common::{ObstacleId, ObstacleLayout, Real, Vec2};

use crate::config::ConfigError;

/// A static circular obstacle on the ground plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub id: ObstacleId,
    /// Center as (x, z)
    pub center: Vec2,
    pub radius: Real,
}

/// Immutable, ordered set of obstacles built once at world setup.
///
/// Order matters: the step resolves obstacles sequentially in this order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    /// Build a field with a uniform radius for every center of `layout`
    pub fn from_layout(layout: &ObstacleLayout, radius: Real) -> Result<Self, ConfigError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::NonPositiveRadius(radius));
        }
        let obstacles = layout
            .positions
            .iter()
            .enumerate()
            .map(|(i, center)| Obstacle { id: ObstacleId::from(i), center: *center, radius })
            .collect();
        Ok(Self { obstacles })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Obstacles whose center lies within `radius` of `point` (x, z)
    pub fn near(&self, point: Vec2, radius: Real) -> impl Iterator<Item = &Obstacle> {
        self.obstacles
            .iter()
            .filter(move |o| (o.center - point).norm() <= radius)
    }
}
