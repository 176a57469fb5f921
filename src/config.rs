//! Arcade configuration.
//!
//! Read from JSON (every field optional), then overridden by CLI flags.

use crate::constants::*;
use crate::error::{ArcadeError, Result};
use crate::snake::{CollisionPolicy, Position};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up when `--config` is not given.
pub const CONFIG_FILENAME: &str = "config.json";

/// Starfield decoration tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub enabled: bool,
    pub count: usize,
    /// Depth units per second.
    pub speed: f64,
    pub z_near: f64,
    pub z_far: f64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            count: DEFAULT_STAR_COUNT,
            speed: ARCADE_STAR_SPEED,
            z_near: DEFAULT_Z_NEAR,
            z_far: DEFAULT_Z_FAR,
        }
    }
}

/// Everything needed to build a session and its decorations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub start: Position,
    pub initial_length: usize,
    pub food_start: Position,
    /// Milliseconds between steps.
    pub cadence_ms: u64,
    pub collision_policy: CollisionPolicy,
    /// Readout shows `score * score_multiplier`.
    pub score_multiplier: u32,
    pub starfield: StarfieldConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_LEVEL_WIDTH,
            height: DEFAULT_LEVEL_HEIGHT,
            start: Position::new(DEFAULT_START_X, DEFAULT_START_Y),
            initial_length: DEFAULT_INITIAL_LENGTH,
            food_start: Position::new(DEFAULT_FOOD_X, DEFAULT_FOOD_Y),
            cadence_ms: DEFAULT_CADENCE_MS,
            collision_policy: CollisionPolicy::default(),
            score_multiplier: DEFAULT_SCORE_MULTIPLIER,
            starfield: StarfieldConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON text. `origin` is only used in error messages.
    pub fn from_json(json: &str, origin: &Path) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|source| ArcadeError::ConfigParse {
                path: origin.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json, path)
    }

    /// Load `~/.snake-arcade/config.json` if present, defaults otherwise.
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ArcadeError::InvalidConfig(format!(
                "level must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        let cells = self.width as usize * self.height as usize;
        if cells > MAX_LEVEL_CELLS {
            return Err(ArcadeError::InvalidConfig(format!(
                "level {}x{} has {} cells, limit is {}",
                self.width, self.height, cells, MAX_LEVEL_CELLS
            )));
        }
        if self.initial_length == 0 {
            return Err(ArcadeError::InvalidConfig(
                "initial_length must be at least 1".to_string(),
            ));
        }
        if self.score_multiplier == 0 {
            return Err(ArcadeError::InvalidConfig(
                "score_multiplier must be positive".to_string(),
            ));
        }
        let stars = &self.starfield;
        if !(stars.z_near.is_finite() && stars.z_far.is_finite() && stars.speed.is_finite()) {
            return Err(ArcadeError::InvalidConfig(
                "starfield values must be finite".to_string(),
            ));
        }
        if stars.z_near.abs() >= stars.z_far.abs() {
            return Err(ArcadeError::InvalidConfig(format!(
                "starfield z_near ({}) must be closer than z_far ({})",
                stars.z_near, stars.z_far
            )));
        }
        Ok(())
    }

    /// Cadence after the session's clamp.
    pub fn clamped_cadence_ms(&self) -> u64 {
        self.cadence_ms.clamp(MIN_CADENCE_MS, MAX_CADENCE_MS)
    }
}

/// `~/.snake-arcade/config.json`, when a home directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".snake-arcade").join(CONFIG_FILENAME))
}
