//! Data-driven game balance
//!
//! Every gameplay constant that shapes difficulty lives here so a run can be
//! rebalanced from JSON without touching the simulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning value `{field}` must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },
}

/// Per-variant enemy constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyTuning {
    /// Probability weight of this variant
    pub weight: f32,
    pub size: f32,
    /// Units per tick at difficulty 1.0
    pub speed: f32,
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Difficulty growth per elapsed second: `1 + secs * k`
    pub difficulty_per_sec: f64,
    /// Enemy spawn interval at difficulty 1.0 (ms)
    pub spawn_interval_ms: f64,
    /// Chance that an enemy spawn also drops a power-up
    pub powerup_chance: f64,
    /// How long a power-up effect lasts (ms of unpaused time)
    pub effect_duration_ms: f64,

    pub normal: EnemyTuning,
    pub fast: EnemyTuning,
    pub small: EnemyTuning,

    /// Player speed multiplier while Speed is active
    pub speed_boost: f32,
    /// Shots added per MultiShot pickup
    pub multishot_step: u32,
    /// Shot count cap
    pub max_shots: u32,
    /// Enemy speed multiplier while Slow is active
    pub slow_factor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            difficulty_per_sec: 0.03,
            spawn_interval_ms: 1400.0,
            powerup_chance: 0.12,
            effect_duration_ms: 5000.0,

            normal: EnemyTuning {
                weight: 0.60,
                size: PLAYER_SIZE,
                speed: 0.45,
            },
            fast: EnemyTuning {
                weight: 0.25,
                size: PLAYER_SIZE,
                speed: 0.55,
            },
            small: EnemyTuning {
                weight: 0.15,
                size: 4.0,
                speed: 0.40,
            },

            speed_boost: 1.5,
            multishot_step: 2,
            max_shots: 5,
            slow_factor: 0.5,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall or invert the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let checks = [
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("effect_duration_ms", self.effect_duration_ms),
            ("normal.size", self.normal.size as f64),
            ("fast.size", self.fast.size as f64),
            ("small.size", self.small.size as f64),
            ("speed_boost", self.speed_boost as f64),
            ("slow_factor", self.slow_factor as f64),
        ];
        for (field, value) in checks {
            if value <= 0.0 {
                return Err(TuningError::NonPositive { field, value });
            }
        }
        if self.difficulty_per_sec < 0.0 {
            return Err(TuningError::NonPositive {
                field: "difficulty_per_sec",
                value: self.difficulty_per_sec,
            });
        }
        Ok(())
    }
}
