use crate::types::{Real, Vec2};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Tree positions (x, z) of the reference world
pub const REFERENCE_TREE_POSITIONS: [(Real, Real); 16] = [
    (-20.0, -20.0), (20.0, -20.0), (-20.0, 20.0), (25.0, 25.0),
    (-30.0, 0.0), (30.0, 0.0), (0.0, -30.0), (0.0, 30.0),
    (-15.0, 15.0), (15.0, -15.0), (-25.0, -10.0), (28.0, 12.0),
    (-10.0, -25.0), (12.0, 28.0), (-35.0, 20.0), (35.0, -20.0),
];

/// Ordered list of obstacle centers on the ground plane
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObstacleLayout {
    pub positions: Vec<Vec2>,
}

/// Errors during layout parsing
#[derive(Debug, Error, PartialEq)]
pub enum LayoutParseError {
    #[error("invalid obstacle entry `{0}`, expected `x,z`")] InvalidEntry(String),
    #[error("invalid float value")] ParseFloat(#[from] std::num::ParseFloatError),
    #[error("non-finite coordinate in `{0}`")] NonFinite(String),
}

impl ObstacleLayout {
    /// The 16-tree reference layout
    pub fn reference() -> Self {
        Self {
            positions: REFERENCE_TREE_POSITIONS
                .iter()
                .map(|&(x, z)| Vec2::new(x, z))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl FromStr for ObstacleLayout {
    type Err = LayoutParseError;

    /// Parses `"x,z; x,z; ..."`; each entry may be wrapped in parentheses
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut positions = Vec::new();
        for entry in s.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let inner = entry
                .strip_prefix('(')
                .and_then(|e| e.strip_suffix(')'))
                .unwrap_or(entry);
            let parts: Vec<_> = inner.split(',').map(str::trim).collect();
            if parts.len() != 2 {
                return Err(LayoutParseError::InvalidEntry(entry.to_string()));
            }
            let x: Real = parts[0].parse()?;
            let z: Real = parts[1].parse()?;
            if !x.is_finite() || !z.is_finite() {
                return Err(LayoutParseError::NonFinite(entry.to_string()));
            }
            positions.push(Vec2::new(x, z));
        }
        Ok(ObstacleLayout { positions })
    }
}

impl fmt::Display for ObstacleLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self
            .positions
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect();
        write!(f, "{}", entries.join("; "))
    }
}
