//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Game time advances only through `tick`, never the wall clock
//! - Seeded RNG only
//! - Stable iteration order (collections stored oldest first, updated newest first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod entities;
pub mod rect;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{carrot_caught, catch_zone, obstacle_hits_player};
pub use difficulty::{Difficulty, compute_difficulty, level_for_score};
pub use entities::{
    Body, Carrot, Direction, Obstacle, ObstacleKind, Particle, ParticleColor, Player,
};
pub use rect::Rect;
pub use snapshot::Snapshot;
pub use spawner::{PendingSpawn, SpawnRequest, Spawner};
pub use state::{GameEvent, GamePhase, GameState, RunStats};
pub use tick::{Command, TickInput, apply_command, step, tick};
