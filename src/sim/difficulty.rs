//! Score-driven difficulty curve
//!
//! A single scalar (the run score) determines every spawn and speed
//! parameter. Later steps compound on top of the clamped output of earlier
//! ones, so the game accelerates instead of resetting at each threshold.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Spawn and speed parameters for the current score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Minimum game time between carrot spawns (ms)
    pub spawn_interval: f32,
    /// Base carrot fall speed before jitter
    pub fall_speed: f32,
    /// Chance that a carrot spawn brings a second carrot
    pub multi_spawn_probability: f64,
    /// Whether ground obstacles may spawn at all
    pub obstacles_enabled: bool,
    /// Chance per eligible check that an obstacle spawns
    pub obstacle_spawn_probability: f64,
    /// Leftward obstacle speed (pixels/frame)
    pub obstacle_speed: f32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            spawn_interval: BASE_SPAWN_INTERVAL,
            fall_speed: BASE_FALL_SPEED,
            multi_spawn_probability: 0.0,
            obstacles_enabled: false,
            obstacle_spawn_probability: 0.0,
            obstacle_speed: BASE_OBSTACLE_SPEED,
        }
    }
}

/// Compute the difficulty configuration for a score
pub fn compute_difficulty(score: u32) -> Difficulty {
    let mut config = Difficulty::default();

    if score >= OBSTACLES_START {
        let over = (score - OBSTACLES_START) as f64;
        config.obstacles_enabled = true;
        config.obstacle_spawn_probability = (0.05 + over * 0.001).min(0.3);
        config.obstacle_speed =
            (BASE_OBSTACLE_SPEED + over as f32 * 0.01).min(MAX_OBSTACLE_SPEED);
    }

    if score >= SPEED_INCREASE {
        let m = 1.0 + (score - SPEED_INCREASE) as f32 * 0.01;
        config.fall_speed = (BASE_FALL_SPEED * m).min(FALL_SPEED_CAP);
        config.spawn_interval = (BASE_SPAWN_INTERVAL / m).max(MIN_SPAWN_INTERVAL);
    }

    if score >= MULTI_SPAWN_START {
        config.multi_spawn_probability =
            ((score - MULTI_SPAWN_START) as f64 * 0.003).min(MULTI_SPAWN_MAX);
    }

    if score >= RAPID_INCREASE {
        let r = 1.0 + (score - RAPID_INCREASE) as f32 * 0.01;
        config.fall_speed = (config.fall_speed * r).min(FALL_SPEED_CAP);
        config.spawn_interval = (config.spawn_interval / r).max(MIN_SPAWN_INTERVAL);
        config.obstacle_speed = (config.obstacle_speed * r).min(MAX_OBSTACLE_SPEED);
        config.obstacle_spawn_probability =
            (config.obstacle_spawn_probability * r as f64).min(0.4);
    }

    config
}

/// Display level for a score (1-based, one step per `LEVEL_STEP` points)
#[inline]
pub fn level_for_score(score: u32) -> u32 {
    score / LEVEL_STEP + 1
}
