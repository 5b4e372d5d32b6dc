use std::io;
use std::path::PathBuf;

use drive_common::LayoutParseError;
use drive_physics::ConfigError;
use thiserror::Error;

/// Everything that can stop the terminal host
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid simulation config: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid tree layout: {0}")]
    Layout(#[from] LayoutParseError),
    #[error("cannot read controls file {path}: {source}")]
    ControlsFile { path: PathBuf, source: io::Error },
    #[error("malformed controls in {path}: {source}")]
    ControlsJson { path: PathBuf, source: serde_json::Error },
    #[error("environment variable {name} has invalid value `{value}`")]
    InvalidEnv { name: &'static str, value: String },
    #[error("failed to install logger: {0}")]
    Logging(String),
}
