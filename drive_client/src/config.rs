/**
 * Drive Client Configuration
 *
 * Compile-time defaults plus environment overrides. Lookups go through a
 * closure so tests can supply their own environment.
 */
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use drive_common::{ObstacleLayout, Real};
use drive_physics::constants::TREE_RADIUS;
use drive_physics::{BoundaryConfig, ControlPatch, WorldSetup};
use log::info;
use rand::Rng;

use crate::error::ClientError;

/// Frames per second when `DRIVE_TICK_HZ` is unset
pub const DEFAULT_TICK_HZ: Real = 60.0;

/// How long a key counts as held after its last press or repeat, for
/// terminals that never report key releases
pub const DEFAULT_HOLD_MS: u64 = 150;

pub const DEFAULT_LOG_FILE: &str = "drive.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Trees scattered when a seed is given without a count
pub const DEFAULT_SCATTER_COUNT: usize = 16;

/// Open ground kept around the spawn point in scattered worlds
pub const SCATTER_CLEAR_RADIUS: Real = 10.0;

/// Pending input events between the reader thread and the frame loop
pub const KEY_CHANNEL_CAPACITY: usize = 64;

/// Fractional change applied to acceleration by `+` and `-`
pub const TUNE_STEP: Real = 0.1;

pub const ENV_CONTROLS_FILE: &str = "DRIVE_CONTROLS_FILE";
pub const ENV_TREES: &str = "DRIVE_TREES";
pub const ENV_SCATTER_SEED: &str = "DRIVE_SCATTER_SEED";
pub const ENV_SCATTER_COUNT: &str = "DRIVE_SCATTER_COUNT";
pub const ENV_TICK_HZ: &str = "DRIVE_TICK_HZ";
pub const ENV_HOLD_MS: &str = "DRIVE_HOLD_MS";
pub const ENV_LOG_FILE: &str = "DRIVE_LOG_FILE";
pub const ENV_LOG_LEVEL: &str = "DRIVE_LOG_LEVEL";

/// Where the obstacles come from
#[derive(Debug, Clone, PartialEq)]
pub enum WorldSource {
    Reference,
    Layout(ObstacleLayout),
    Scatter { seed: Option<u64>, count: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub controls_file: Option<PathBuf>,
    pub world: WorldSource,
    pub tick_hz: Real,
    pub hold: Duration,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl ClientSettings {
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let seed: Option<u64> = parse_var(ENV_SCATTER_SEED, get(ENV_SCATTER_SEED))?;
        let count: Option<usize> = parse_var(ENV_SCATTER_COUNT, get(ENV_SCATTER_COUNT))?;
        let world = match get(ENV_TREES) {
            Some(trees) => WorldSource::Layout(trees.parse()?),
            None if seed.is_some() || count.is_some() => WorldSource::Scatter {
                seed,
                count: count.unwrap_or(DEFAULT_SCATTER_COUNT),
            },
            None => WorldSource::Reference,
        };

        let tick_hz = parse_var(ENV_TICK_HZ, get(ENV_TICK_HZ))?.unwrap_or(DEFAULT_TICK_HZ);
        let hold_ms = parse_var(ENV_HOLD_MS, get(ENV_HOLD_MS))?.unwrap_or(DEFAULT_HOLD_MS);

        Ok(Self {
            controls_file: get(ENV_CONTROLS_FILE).map(PathBuf::from),
            world,
            tick_hz,
            hold: Duration::from_millis(hold_ms),
            log_file: get(ENV_LOG_FILE).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            log_level: get(ENV_LOG_LEVEL).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }

    /// Build the world the settings describe
    pub fn build_world(&self) -> Result<WorldSetup, ClientError> {
        let boundary = BoundaryConfig::default();
        let world = match &self.world {
            WorldSource::Reference => WorldSetup::reference(),
            WorldSource::Layout(layout) => WorldSetup::from_layout(layout, TREE_RADIUS, boundary)?,
            WorldSource::Scatter { seed, count } => {
                let seed = seed.unwrap_or_else(|| rand::rng().random());
                info!("Scattering {} trees with seed {}", count, seed);
                WorldSetup::scattered(seed, *count, SCATTER_CLEAR_RADIUS, boundary)?
            }
        };
        Ok(world)
    }

    /// Control overrides from the JSON file, if one is configured
    pub fn load_controls_patch(&self) -> Result<ControlPatch, ClientError> {
        match &self.controls_file {
            Some(path) => read_controls_patch(path),
            None => Ok(ControlPatch::default()),
        }
    }
}

fn parse_var<T: FromStr>(name: &'static str, value: Option<String>) -> Result<Option<T>, ClientError> {
    value
        .map(|v| v.parse::<T>().map_err(|_| ClientError::InvalidEnv { name, value: v }))
        .transpose()
}

pub fn read_controls_patch(path: &Path) -> Result<ControlPatch, ClientError> {
    let text = fs::read_to_string(path).map_err(|source| ClientError::ControlsFile { path: path.to_path_buf(), source })?;
    parse_controls_patch(&text).map_err(|source| ClientError::ControlsJson { path: path.to_path_buf(), source })
}

/// Parse a JSON object such as `{"max_speed": 60, "brake_factor": 0.9}`
pub fn parse_controls_patch(text: &str) -> Result<ControlPatch, serde_json::Error> {
    serde_json::from_str(text)
}
