//! Simulation Configuration
//!
//! Tunables grouped in one serde-loadable struct. Every field has a default,
//! so a config file only needs the keys it overrides.

use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::core::constants::{
    BOSS_MISSILE_INTERVAL_MS, COMBO_TIMEOUT_MS, FRAME_MS, PICKUP_DROP_CHANCE,
};
use crate::game::state::{GamePhase, WorldBounds};
use crate::game::time_scale::BulletTimeConfig;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// World bounds must be positive.
    #[error("Invalid bounds: {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },

    /// Frame duration must be positive.
    #[error("Invalid frame duration: {0} ms")]
    InvalidFrameDuration(f32),

    /// Slow-motion scale must lie in (0, 1].
    #[error("Invalid bullet-time scale: {0}")]
    InvalidTimeScale(f32),

    /// A probability outside [0, 1].
    #[error("Invalid probability for {name}: {value}")]
    InvalidProbability { name: &'static str, value: f32 },

    /// A duration or rate that must not be negative.
    #[error("Negative value for {name}: {value}")]
    Negative { name: &'static str, value: f32 },

    /// Malformed JSON.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Could not read the config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Lifecycle command errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    /// Command not valid in the current phase.
    #[error("{command} not allowed during {phase:?}")]
    WrongPhase {
        command: &'static str,
        phase: GamePhase,
    },
}

/// Simulation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// World RNG seed
    pub seed: u64,
    /// Viewport dimensions
    pub bounds: WorldBounds,
    /// Real duration of one frame (ms)
    pub frame_ms: f32,
    /// Bullet-time tunables
    pub bullet_time: BulletTimeConfig,
    /// Combo reset window (ms)
    pub combo_timeout_ms: f32,
    /// Chance that a killed enemy drops a health pickup
    pub pickup_drop_chance: f32,
    /// Delay between barrage missiles (ms)
    pub boss_missile_interval_ms: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0x4E45_4F4E,
            bounds: WorldBounds::default(),
            frame_ms: FRAME_MS,
            bullet_time: BulletTimeConfig::default(),
            combo_timeout_ms: COMBO_TIMEOUT_MS,
            pickup_drop_chance: PICKUP_DROP_CHANCE,
            boss_missile_interval_ms: BOSS_MISSILE_INTERVAL_MS,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check every tunable is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let WorldBounds { width, height } = self.bounds;
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidBounds { width, height });
        }
        if !(self.frame_ms > 0.0) {
            return Err(ConfigError::InvalidFrameDuration(self.frame_ms));
        }

        let scale = self.bullet_time.slow_scale;
        if !(scale > 0.0 && scale <= 1.0) {
            return Err(ConfigError::InvalidTimeScale(scale));
        }

        if !(0.0..=1.0).contains(&self.pickup_drop_chance) {
            return Err(ConfigError::InvalidProbability {
                name: "pickup_drop_chance",
                value: self.pickup_drop_chance,
            });
        }

        let non_negative = [
            ("bullet_time.drain", self.bullet_time.drain),
            ("bullet_time.recharge", self.bullet_time.recharge),
            ("bullet_time.cooldown_ms", self.bullet_time.cooldown_ms),
            ("combo_timeout_ms", self.combo_timeout_ms),
            ("boss_missile_interval_ms", self.boss_missile_interval_ms),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { name, value });
            }
        }

        Ok(())
    }
}
