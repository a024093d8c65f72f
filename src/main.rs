//! Bunny Bag headless entry point
//!
//! Drives the simulation at a fixed 60 Hz frame time with a simple
//! autopilot standing in for keyboard input, then logs a run summary.
//!
//! Environment:
//! - `BUNNY_BAG_SEED`: run seed (default 12345)
//! - `BUNNY_BAG_FRAMES`: frame budget (default 36000, ten minutes)
//! - `BUNNY_BAG_SCORE_FILE`: best score file (default `$HOME/.bunny_bag_best_score`)
//! - `RUST_LOG`: log filter (default `info`)

use std::error::Error;

use bunny_bag::consts::*;
use bunny_bag::sim::{Direction, GameEvent, GamePhase, GameState, TickInput};
use bunny_bag::{FileScoreStore, Game};

/// 60 Hz display refresh
const FRAME_MS: f32 = 1000.0 / 60.0;
/// Jump when an obstacle's gap to the player drops below this
const JUMP_TRIGGER_GAP: f32 = 40.0;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, Box<dyn Error>>
where
    T::Err: Error + 'static,
{
    match std::env::var(key) {
        Ok(value) => Ok(value.trim().parse()?),
        Err(_) => Ok(default),
    }
}

/// Pick this frame's input by looking at the state like a player would
fn autopilot(state: &GameState) -> TickInput {
    match state.phase {
        GamePhase::Title | GamePhase::HitPause => {
            return TickInput {
                primary: true,
                ..Default::default()
            };
        }
        GamePhase::Paused | GamePhase::GameOver => return TickInput::default(),
        GamePhase::Playing => {}
    }

    let player = &state.player;
    let player_center = player.pos.x + player.size.x / 2.0;
    let player_right = player.pos.x + player.size.x;

    // Chase the lowest carrot
    let target = state
        .carrots
        .iter()
        .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(std::cmp::Ordering::Equal))
        .map(|c| c.pos.x + c.size.x / 2.0);

    let direction = match target {
        Some(x) if x < player_center - PLAYER_SPEED => Direction::Left,
        Some(x) if x > player_center + PLAYER_SPEED => Direction::Right,
        _ => Direction::None,
    };

    let jump = state.obstacles.iter().any(|o| {
        let gap = o.pos.x - player_right;
        (0.0..JUMP_TRIGGER_GAP).contains(&gap)
    });

    TickInput {
        direction,
        jump,
        ..Default::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Bunny Bag (headless) starting...");

    let seed: u64 = env_or("BUNNY_BAG_SEED", 12345)?;
    let frames: u64 = env_or("BUNNY_BAG_FRAMES", 36_000)?;
    let store = match std::env::var("BUNNY_BAG_SCORE_FILE") {
        Ok(path) => FileScoreStore::new(path),
        Err(_) => FileScoreStore::in_home_dir(),
    };
    log::info!("Best score file: {}", store.path().display());

    let mut game = Game::new(seed, store);
    let mut hits = 0;
    let mut frames_run: u64 = 0;

    for _ in 0..frames {
        frames_run += 1;
        let input = autopilot(game.state());
        for event in game.update(&input, FRAME_MS) {
            match event {
                GameEvent::ObstacleHit { .. } => hits += 1,
                GameEvent::GameOver { new_best: true, score } => {
                    log::info!("New best score: {}", score);
                }
                _ => {}
            }
        }
        if game.phase() == GamePhase::GameOver {
            break;
        }
    }

    let snapshot = game.snapshot();
    log::info!(
        "Finished in {:?} after {} frames ({} played): score {}, level {}, accuracy {}%, max combo {}, hits {}, best {}",
        snapshot.phase,
        frames_run,
        snapshot.tick,
        snapshot.hud.score,
        snapshot.hud.level,
        snapshot.hud.accuracy,
        snapshot.hud.max_combo,
        hits,
        game.best_score()
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `Game` directly; nothing to do here
}
