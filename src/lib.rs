//! Bunny Bag - a carrot catching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, game state)
//! - `game`: Facade that owns the simulation and the best-score store
//! - `best_score`: Persistence of the single best-score integer
//! - `settings`: Session toggles read by the presentation layer

pub mod best_score;
pub mod game;
pub mod settings;
pub mod sim;

pub use best_score::{BestScore, FileScoreStore, MemoryScoreStore, ScoreStore, StoreError};
pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Ground line: the player's feet rest here and carrots below it are missed
    pub const GROUND_Y: f32 = SCREEN_HEIGHT - 20.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;
    /// Horizontal pixels per frame
    pub const PLAYER_SPEED: f32 = 4.0;
    /// Upward velocity applied on jump (pixels/frame)
    pub const JUMP_POWER: f32 = 14.0;
    /// Added to vertical velocity every airborne frame
    pub const GRAVITY: f32 = 0.5;
    pub const START_LIVES: u32 = 3;

    /// Carried bag (the catch zone)
    pub const BAG_WIDTH: f32 = 40.0;
    pub const BAG_HEIGHT: f32 = 20.0;

    /// Carrot defaults
    pub const CARROT_SIZE: f32 = 16.0;
    pub const POINTS_PER_CATCH: u32 = 10;
    /// Fall speed jitter is uniform in [-FALL_JITTER/2, FALL_JITTER/2]
    pub const FALL_JITTER: f32 = 0.3;
    /// Carrot motion is speed * dt_ms * MOTION_SCALE
    pub const MOTION_SCALE: f32 = 0.1;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 24.0;
    pub const OBSTACLE_HEIGHT: f32 = 32.0;
    pub const BASE_OBSTACLE_SPEED: f32 = 2.5;
    pub const MAX_OBSTACLE_SPEED: f32 = 5.5;
    /// Share of obstacles spawned as logs (the rest are rocks)
    pub const LOG_SHARE: f64 = 0.7;

    /// Score thresholds for difficulty steps
    pub const OBSTACLES_START: u32 = 100;
    pub const SPEED_INCREASE: u32 = 200;
    pub const MULTI_SPAWN_START: u32 = 300;
    pub const RAPID_INCREASE: u32 = 500;

    /// Spawn timing (milliseconds of game time)
    pub const BASE_SPAWN_INTERVAL: f32 = 2000.0;
    pub const MIN_SPAWN_INTERVAL: f32 = 200.0;
    pub const OBSTACLE_SPAWN_INTERVAL: f32 = 4000.0;
    pub const SECOND_SPAWN_DELAY: f32 = 200.0;
    pub const THIRD_SPAWN_DELAY: f32 = 400.0;

    /// Fall speed bounds
    pub const BASE_FALL_SPEED: f32 = 2.0;
    pub const FALL_SPEED_CAP: f32 = 12.0;
    pub const MULTI_SPAWN_MAX: f64 = 0.5;

    /// Placement drift ranges (total width of the uniform offset window)
    pub const MID_DRIFT_RANGE: f32 = 150.0;
    pub const LATE_DRIFT_RANGE: f32 = 200.0;

    /// Particle bursts
    pub const CATCH_PARTICLES: usize = 5;
    pub const HIT_PARTICLES: usize = 8;
    pub const GROUND_PARTICLES: usize = 3;
    pub const STAGE_UP_PARTICLES: usize = 20;
    pub const MAX_PARTICLES: usize = 256;
    /// Undrained event queue limit
    pub const MAX_EVENTS: usize = 1024;

    /// Points per displayed level
    pub const LEVEL_STEP: u32 = 25;
    /// Score at which the HUD progress bar is full
    pub const PROGRESS_MAX_SCORE: u32 = 1000;
}

/// Clamp `value` into `[min, max]`, collapsing to `min` when the range is empty
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max.max(min))
}
