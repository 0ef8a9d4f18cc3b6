//! Data-driven game balance
//!
//! Everything a designer would want to nudge without touching simulation
//! code. The host page may embed a JSON override; missing fields fall back
//! to the shipped defaults.

use serde::{Deserialize, Serialize};

/// Game balance knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (px/frame²)
    pub gravity: f32,
    /// Jump impulse (px/frame, negative is up)
    pub jump_force: f32,
    /// Coin scroll speed at level 1 (px/frame)
    pub coin_speed: f32,
    /// Obstacle scroll speed at level 1 (px/frame)
    pub obstacle_speed: f32,
    /// Coin spawn cadence at level 1 (ms)
    pub coin_spawn_ms: f32,
    /// Obstacle spawn cadence at level 1 (ms)
    pub obstacle_spawn_ms: f32,
    /// Speed-up per level above 1 (0.1 = 10%)
    pub speed_increase: f32,
    /// Coins per level-up
    pub level_up_score: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            jump_force: -15.0,
            coin_speed: 5.0,
            obstacle_speed: 6.0,
            coin_spawn_ms: 1500.0,
            obstacle_spawn_ms: 2000.0,
            speed_increase: 0.1,
            level_up_score: 20,
        }
    }
}

impl Tuning {
    /// Parse an override blob; fields not present keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Difficulty multiplier for a level (level 1 = 1.0)
    pub fn level_scale(&self, level: u32) -> f32 {
        1.0 + level.saturating_sub(1) as f32 * self.speed_increase
    }

    /// Spawn interval for a base cadence at a level. Strictly decreasing
    /// in level, never zero.
    pub fn spawn_interval_ms(&self, base_ms: f32, level: u32) -> f32 {
        base_ms / self.level_scale(level)
    }
}
