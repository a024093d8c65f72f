//! Game state and core simulation types
//!
//! Everything the simulation mutates lives here and is owned by `GameState`.
//! The presentation layer only reads it (see `snapshot`).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::{Difficulty, compute_difficulty, level_for_score};
use super::entities::{Carrot, Obstacle, Particle, ParticleColor, Player};
use super::spawner::{self, Spawner};
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to start
    Title,
    /// Active gameplay
    Playing,
    /// Paused by the player
    Paused,
    /// Lost a life to an obstacle, waiting for acknowledgment
    HitPause,
    /// Run ended
    GameOver,
}

/// Per-run bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub score: u32,
    pub lives: u32,
    /// Consecutive catches since the last drop or hit
    pub combo: u32,
    pub max_combo: u32,
    /// Carrots caught
    pub caught: u32,
    /// Carrots spawned
    pub spawned: u32,
    /// Display level, derived from score
    pub level: u32,
}

impl Default for RunStats {
    fn default() -> Self {
        Self {
            score: 0,
            lives: START_LIVES,
            combo: 0,
            max_combo: 0,
            caught: 0,
            spawned: 0,
            level: 1,
        }
    }
}

impl RunStats {
    /// Catch percentage, rounded; 0 before anything spawned
    pub fn accuracy(&self) -> u32 {
        if self.spawned == 0 {
            0
        } else {
            ((self.caught as f64 / self.spawned as f64) * 100.0).round() as u32
        }
    }
}

/// Lifecycle and gameplay notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Continued { lives: u32 },
    CarrotCaught { score: u32, combo: u32 },
    CarrotMissed,
    ObstacleHit { lives: u32 },
    LevelUp { level: u32 },
    GameOver { score: u32, new_best: bool },
    Reset,
    MuteToggled { muted: bool },
    VisualFilterToggled { enabled: bool },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (placement, jitter, spawn rolls)
    pub rng: Pcg32,
    /// Cosmetic RNG, kept separate so particles never shift gameplay rolls
    pub fx_rng: Pcg32,
    pub phase: GamePhase,
    pub stats: RunStats,
    /// Best score known to this session
    pub best_score: u32,
    pub player: Player,
    /// Active carrots, oldest first
    pub carrots: Vec<Carrot>,
    /// Active obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub spawner: Spawner,
    /// Elapsed game time while Playing (ms)
    pub game_time_ms: f32,
    /// Simulation frame counter
    pub time_ticks: u64,
    /// Game time at which the last HitPause began
    pub hit_pause_at_ms: Option<f32>,
    pub settings: Settings,
    /// Pending notifications, oldest first. Hosts driving `tick` directly
    /// must call `drain_events`; past `MAX_EVENTS` the oldest are dropped.
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game on the title screen
    pub fn new(seed: u64, best_score: u32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15),
            phase: GamePhase::Title,
            stats: RunStats::default(),
            best_score,
            player: Player::new(),
            carrots: Vec::new(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            spawner: Spawner::new(),
            game_time_ms: 0.0,
            time_ticks: 0,
            hit_pause_at_ms: None,
            settings: Settings::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Clear the run: counters, entities, timers and pending spawns
    pub fn reset(&mut self) {
        self.stats = RunStats::default();
        self.player = Player::new();
        self.carrots.clear();
        self.obstacles.clear();
        self.particles.clear();
        self.spawner.reset();
        self.game_time_ms = 0.0;
        self.time_ticks = 0;
        self.hit_pause_at_ms = None;
        self.push_event(GameEvent::Reset);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Queue a notification, dropping the oldest once the queue is full
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
        if self.events.len() > MAX_EVENTS {
            let excess = self.events.len() - MAX_EVENTS;
            self.events.drain(..excess);
            log::debug!("Event queue full, dropped {} undrained events", excess);
        }
    }

    /// Difficulty for the current score
    pub fn difficulty(&self) -> Difficulty {
        compute_difficulty(self.stats.score)
    }

    /// HUD progress bar fill in [0, 1]
    pub fn progress(&self) -> f32 {
        (self.stats.score as f32 / PROGRESS_MAX_SCORE as f32).min(1.0)
    }

    /// Create a carrot according to the placement policy
    pub fn spawn_carrot(&mut self) {
        let difficulty = self.difficulty();
        let last_x = self.carrots.last().map(|c| c.pos.x);
        let x = spawner::carrot_x(self.stats.score, last_x, &mut self.rng);
        let speed = spawner::carrot_speed(&difficulty, &mut self.rng);
        let id = self.next_entity_id();
        self.carrots.push(Carrot::new(id, x, speed));
        self.stats.spawned += 1;
        log::debug!("Carrot {} at x={:.0} speed={:.2}", id, x, speed);
    }

    /// Create an obstacle at the right screen edge
    pub fn spawn_obstacle(&mut self) {
        let difficulty = self.difficulty();
        let kind = spawner::obstacle_kind(&mut self.rng);
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle::new(id, kind, difficulty.obstacle_speed));
        log::debug!("Obstacle {} ({:?}) speed={:.2}", id, kind, difficulty.obstacle_speed);
    }

    /// Score a caught carrot
    pub fn on_carrot_caught(&mut self, carrot: &Carrot) {
        self.stats.score += POINTS_PER_CATCH;
        self.stats.caught += 1;
        self.stats.combo += 1;
        self.stats.max_combo = self.stats.max_combo.max(self.stats.combo);
        self.emit_particles(
            carrot.pos + carrot.size * 0.5,
            CATCH_PARTICLES,
            4.0,
            2.0,
            1000.0,
            ParticleColor::Carrot,
        );
        self.push_event(GameEvent::CarrotCaught {
            score: self.stats.score,
            combo: self.stats.combo,
        });
    }

    /// A carrot reached the ground: combo broken, no life lost
    pub fn on_carrot_missed(&mut self, carrot: &Carrot) {
        self.stats.combo = 0;
        self.emit_particles(
            carrot.pos + carrot.size * 0.5,
            GROUND_PARTICLES,
            2.0,
            0.0,
            500.0,
            ParticleColor::Ground,
        );
        self.push_event(GameEvent::CarrotMissed);
    }

    /// An obstacle hit the player: lose a life, pause or end the run
    pub fn on_obstacle_hit(&mut self, obstacle: &Obstacle) {
        self.stats.combo = 0;
        self.stats.lives = self.stats.lives.saturating_sub(1);
        self.emit_particles(
            obstacle.pos + obstacle.size * 0.5,
            HIT_PARTICLES,
            6.0,
            3.0,
            800.0,
            ParticleColor::Shadow,
        );
        self.push_event(GameEvent::ObstacleHit {
            lives: self.stats.lives,
        });

        if self.stats.lives == 0 {
            self.game_over();
        } else if self.phase != GamePhase::GameOver {
            self.phase = GamePhase::HitPause;
            self.hit_pause_at_ms = Some(self.game_time_ms);
            log::info!("Hit! {} lives left", self.stats.lives);
        }
    }

    /// End the run and record the best score if beaten
    pub fn game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.hit_pause_at_ms = None;

        let new_best = self.stats.score > self.best_score;
        if new_best {
            self.best_score = self.stats.score;
        }
        log::info!(
            "Game over: score {} (best {}), max combo {}, accuracy {}%",
            self.stats.score,
            self.best_score,
            self.stats.max_combo,
            self.stats.accuracy()
        );
        self.push_event(GameEvent::GameOver {
            score: self.stats.score,
            new_best,
        });
    }

    /// Raise the display level if the score crossed a step
    pub fn update_level(&mut self) {
        let level = level_for_score(self.stats.score);
        if level > self.stats.level {
            self.stats.level = level;
            self.emit_particles(
                Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
                STAGE_UP_PARTICLES,
                8.0,
                0.0,
                2000.0,
                ParticleColor::Ui,
            );
            self.push_event(GameEvent::LevelUp { level });
            log::info!("Level {}", level);
        }
    }

    /// Spawn a burst of particles with velocities spread around `-lift` on y
    fn emit_particles(
        &mut self,
        center: Vec2,
        count: usize,
        spread: f32,
        lift: f32,
        life: f32,
        color: ParticleColor,
    ) {
        let max = self.settings.max_particles();
        if max == 0 {
            return;
        }
        for _ in 0..count {
            let vx = (self.fx_rng.random::<f32>() - 0.5) * spread;
            let vy = (self.fx_rng.random::<f32>() - 0.5) * spread - lift;
            self.particles
                .push(Particle::new(center, Vec2::new(vx, vy), life, color));
        }
        if self.particles.len() > max {
            let excess = self.particles.len() - max;
            self.particles.drain(..excess);
        }
    }
}
