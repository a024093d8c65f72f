//! Render feed for the presentation layer
//!
//! A read-only, serializable copy of what the renderer and HUD need.

use serde::{Deserialize, Serialize};

use super::collision::catch_zone;
use super::entities::{Direction, ObstacleKind, ParticleColor};
use super::rect::Rect;
use super::state::{GamePhase, GameState};
use crate::settings::Settings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerPose {
    pub bounds: Rect,
    pub bag: Rect,
    pub direction: Direction,
    pub on_ground: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrotView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    pub x: f32,
    pub y: f32,
    /// Horizontal gap to the player's right edge, for approach warnings
    pub distance_to_player: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub alpha: f32,
    pub color: ParticleColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u32,
    pub lives: u32,
    pub combo: u32,
    pub max_combo: u32,
    /// Percent of spawned carrots caught
    pub accuracy: u32,
    pub level: u32,
    pub best_score: u32,
    /// Progress bar fill in [0, 1]
    pub progress: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub player: PlayerPose,
    pub carrots: Vec<CarrotView>,
    pub obstacles: Vec<ObstacleView>,
    pub particles: Vec<ParticleView>,
    pub hud: Hud,
    pub settings: Settings,
}

/// Build a snapshot from the current state
pub fn build(state: &GameState) -> Snapshot {
    let player = &state.player;
    let player_right = player.pos.x + player.size.x;

    Snapshot {
        tick: state.time_ticks,
        phase: state.phase,
        player: PlayerPose {
            bounds: Rect {
                pos: player.pos,
                size: player.size,
            },
            bag: catch_zone(player),
            direction: player.direction,
            on_ground: player.on_ground,
        },
        carrots: state
            .carrots
            .iter()
            .map(|c| CarrotView {
                id: c.id,
                x: c.pos.x,
                y: c.pos.y,
            })
            .collect(),
        obstacles: state
            .obstacles
            .iter()
            .map(|o| ObstacleView {
                id: o.id,
                kind: o.kind,
                x: o.pos.x,
                y: o.pos.y,
                distance_to_player: o.pos.x - player_right,
            })
            .collect(),
        particles: state
            .particles
            .iter()
            .map(|p| ParticleView {
                x: p.pos.x,
                y: p.pos.y,
                alpha: p.alpha(),
                color: p.color,
            })
            .collect(),
        hud: Hud {
            score: state.stats.score,
            lives: state.stats.lives,
            combo: state.stats.combo,
            max_combo: state.stats.max_combo,
            accuracy: state.stats.accuracy(),
            level: state.stats.level,
            best_score: state.best_score,
            progress: state.progress(),
        },
        settings: state.settings.clone(),
    }
}

impl Snapshot {
    /// Serialize for a JS or IPC host
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
