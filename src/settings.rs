//! Minigame tuning
//!
//! Loaded once when the controller is built. Stored as JSON alongside the
//! rest of the game's data files.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons tuning data can be rejected
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(&'static str),
}

/// Grid rotation puzzle tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Tiles per side
    pub size: usize,
    /// Moves before the board is called exhausted
    pub max_moves: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: GRID_SIZE,
            max_moves: GRID_MAX_MOVES,
        }
    }
}

/// Cylinder alignment puzzle tuning (degrees, degrees/second)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderSettings {
    pub base_speed: f32,
    /// Speed added after every successful strike
    pub speed_step: f32,
    /// Full width of the acceptance window
    pub target_range: f32,
    pub alignments_needed: u32,
}

impl Default for CylinderSettings {
    fn default() -> Self {
        Self {
            base_speed: CYLINDER_BASE_SPEED,
            speed_step: CYLINDER_SPEED_STEP,
            target_range: CYLINDER_TARGET_RANGE,
            alignments_needed: CYLINDER_ALIGNMENTS_NEEDED,
        }
    }
}

/// All minigame tuning
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinigameSettings {
    pub grid: GridSettings,
    pub cylinder: CylinderSettings,
    /// Fixed generation seed (random per controller when absent)
    pub seed: Option<u64>,
}

impl MinigameSettings {
    /// Parse and validate settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded minigame settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default minigame settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject tuning that would make a puzzle unplayable or unbounded
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.grid.validate()?;
        self.cylinder.validate()
    }
}

impl GridSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.size == 0 {
            return Err(SettingsError::Invalid("grid size must be at least 1"));
        }
        if self.max_moves == 0 {
            return Err(SettingsError::Invalid("grid max_moves must be at least 1"));
        }
        Ok(())
    }
}

impl CylinderSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.base_speed.is_finite() && self.base_speed > 0.0) {
            return Err(SettingsError::Invalid("cylinder base_speed must be positive"));
        }
        if !(self.speed_step.is_finite() && self.speed_step >= 0.0) {
            return Err(SettingsError::Invalid("cylinder speed_step must not be negative"));
        }
        if !(self.target_range > 0.0 && self.target_range < 360.0) {
            return Err(SettingsError::Invalid("cylinder target_range must be in (0, 360)"));
        }
        if self.alignments_needed == 0 {
            return Err(SettingsError::Invalid("cylinder alignments_needed must be at least 1"));
        }
        Ok(())
    }
}
