//! World configuration
//!
//! Supplied once when a [`crate::Game`] is built. Every spawn coordinate is
//! relative to `world_width`; the ground line sits `ground_height` above the
//! bottom of the world.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::spawner::SpawnTable;

/// Tolerance when checking that spawn weights sum to 1
const TABLE_SUM_EPSILON: f32 = 1e-4;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("world dimension `{name}` must be positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: f32 },
    #[error("ground height {ground} leaves no room in a world {height} tall")]
    GroundTooHigh { ground: f32, height: f32 },
    #[error("spawn weight for {category} is negative ({weight})")]
    NegativeWeight { category: String, weight: f32 },
    #[error("spawn weights sum to {sum}, expected 1.0")]
    SpawnTableSum { sum: f32 },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// World and tuning parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    /// Thickness of the ground strip under the ground line
    pub ground_height: f32,

    // === Player ===
    /// Fixed horizontal position of the player. Must sit within the catch
    /// distance of the pursuer's left clamp for the 2-hit catch to be reachable.
    pub player_x: f32,
    /// Downward acceleration per tick while rising
    pub gravity: f32,

    // === Difficulty ===
    /// Scroll speed at run start (units per tick)
    pub initial_scroll_speed: f32,
    /// Pursuer speed before hit escalation
    pub monster_base_speed: f32,

    // === Generation ===
    pub spawn_table: SpawnTable,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 400.0,
            ground_height: 50.0,

            player_x: 100.0,
            gravity: 0.6,

            initial_scroll_speed: 5.0,
            monster_base_speed: 3.0,

            spawn_table: SpawnTable::standard(),
        }
    }
}

impl Settings {
    /// Y coordinate of the ground line (top of the ground strip)
    pub fn ground_y(&self) -> f32 {
        self.world_height - self.ground_height
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check dimensions and the spawn table
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("ground_height", self.ground_height),
            ("initial_scroll_speed", self.initial_scroll_speed),
            ("monster_base_speed", self.monster_base_speed),
        ] {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::NonPositiveDimension { name, value });
            }
        }

        if self.ground_height >= self.world_height {
            return Err(ConfigError::GroundTooHigh {
                ground: self.ground_height,
                height: self.world_height,
            });
        }

        for (category, weight) in self.spawn_table.entries() {
            if *weight < 0.0 {
                return Err(ConfigError::NegativeWeight {
                    category: format!("{category:?}"),
                    weight: *weight,
                });
            }
        }

        let sum = self.spawn_table.total();
        if (sum - 1.0).abs() > TABLE_SUM_EPSILON {
            return Err(ConfigError::SpawnTableSum { sum });
        }

        Ok(())
    }
}
