//! Explicit game/UI state shared between the host and the step loop.
//!
//! The host owns a `GameStore` and lends it to `Simulation::step` each tick.
//! Controls can be tuned at any time between ticks; invalid updates are
//! rejected and leave the previous controls in place.

use drive_common::Real;
use log::{info, warn};

use crate::config::{ConfigError, ControlConfig, ControlPatch};

#[derive(Debug, Clone, PartialEq)]
pub struct GameStore {
    controls: ControlConfig,
    paused: bool,
    /// Last speed reported by the simulation, for display
    speed: Real,
}

impl Default for GameStore {
    fn default() -> Self {
        Self {
            controls: ControlConfig::default(),
            paused: false,
            speed: 0.0,
        }
    }
}

impl GameStore {
    pub fn new(controls: ControlConfig) -> Result<Self, ConfigError> {
        controls.validate()?;
        Ok(Self { controls, ..Default::default() })
    }

    pub fn controls(&self) -> &ControlConfig {
        &self.controls
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn speed(&self) -> Real {
        self.speed
    }

    /// Flip the pause flag and return the new value
    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            info!("Simulation {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
    }

    /// Merge a partial update over the current controls
    pub fn update_controls(&mut self, patch: &ControlPatch) -> Result<&ControlConfig, ConfigError> {
        match self.controls.merged(patch) {
            Ok(merged) => {
                self.controls = merged;
                info!("Controls updated: {:?}", self.controls);
                Ok(&self.controls)
            }
            Err(e) => {
                warn!("Rejected control update {:?}: {}", patch, e);
                Err(e)
            }
        }
    }

    /// Swap in a whole new control set
    pub fn replace_controls(&mut self, controls: ControlConfig) -> Result<(), ConfigError> {
        controls.validate()?;
        self.controls = controls;
        info!("Controls replaced: {:?}", self.controls);
        Ok(())
    }

    pub(crate) fn set_speed(&mut self, speed: Real) {
        self.speed = speed;
    }

    /// Clear per-session fields; controls survive a reset
    pub(crate) fn reset_session(&mut self) {
        self.speed = 0.0;
        self.paused = false;
    }
}
