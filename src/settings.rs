//! Engine settings
//!
//! Playfield extents, the size unit and the RNG seed. Loaded from JSON; any
//! missing field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// What a turning projectile does once it has traveled its turn distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TurnMode {
    /// Snap to due right at base speed; the requested turn angle is recorded but unused
    #[default]
    SnapHorizontal,
    /// Turn toward the requested angle at base speed
    Requested,
}

impl TurnMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnMode::SnapHorizontal => "snap_horizontal",
            TurnMode::Requested => "requested",
        }
    }
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield width in pixels
    pub playfield_width: f32,
    /// Playfield height in pixels
    pub playfield_height: f32,
    /// Extra space around the playfield before projectiles are culled
    pub cull_margin: f32,
    /// Size unit in pixels
    pub unit_size: f32,
    /// RNG seed (dash targets)
    pub seed: u64,
    /// Post-turn behavior of turning projectiles
    pub turn_mode: TurnMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            cull_margin: CULL_MARGIN,
            unit_size: UNIT_SIZE,
            seed: 0x5EED,
            turn_mode: TurnMode::SnapHorizontal,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.playfield_width.is_nan() || self.playfield_width <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "playfield_width",
                reason: "must be positive",
            });
        }
        if self.playfield_height.is_nan() || self.playfield_height <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "playfield_height",
                reason: "must be positive",
            });
        }
        if self.cull_margin.is_nan() || self.cull_margin < 0.0 {
            return Err(ConfigError::Invalid {
                field: "cull_margin",
                reason: "must not be negative",
            });
        }
        if self.unit_size.is_nan() || self.unit_size <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "unit_size",
                reason: "must be positive",
            });
        }
        Ok(())
    }

    /// Inclusive culling bounds: (min_x, max_x, min_y, max_y)
    pub fn cull_bounds(&self) -> (f32, f32, f32, f32) {
        (
            -self.cull_margin,
            self.playfield_width + self.cull_margin,
            -self.cull_margin,
            self.playfield_height + self.cull_margin,
        )
    }
}
