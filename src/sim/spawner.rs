//! Time-gated spawning of carrots and obstacles
//!
//! Timers are measured against simulation game time, never the wall clock.
//! Follow-up carrots from a multi-spawn burst sit in a pending queue tagged
//! with the run generation; a reset clears the queue and bumps the
//! generation so nothing leaks into the next run.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::entities::ObstacleKind;
use crate::clamp;
use crate::consts::*;

/// A deferred carrot spawn from a multi-spawn burst
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingSpawn {
    /// Game time (ms) at which the carrot appears
    pub due_ms: f32,
    /// Run generation this spawn belongs to
    pub generation: u32,
}

/// What the spawner wants created this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnRequest {
    Carrot,
    Obstacle,
}

/// Spawn timers and the pending multi-spawn queue
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    /// Game time of the last scheduled carrot wave; `None` means due now
    pub last_carrot_ms: Option<f32>,
    /// Game time of the last obstacle; `None` means the next check may spawn
    pub last_obstacle_ms: Option<f32>,
    /// Follow-up carrots waiting for their due time
    pub pending: Vec<PendingSpawn>,
    /// Incremented on every reset
    pub generation: u32,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the first wave due immediately and drop every pending spawn from the previous run
    pub fn reset(&mut self) {
        self.last_carrot_ms = None;
        self.last_obstacle_ms = None;
        self.pending.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Decide what to spawn at game time `now_ms`
    pub fn poll<R: Rng + ?Sized>(
        &mut self,
        now_ms: f32,
        difficulty: &Difficulty,
        rng: &mut R,
    ) -> Vec<SpawnRequest> {
        let mut requests = Vec::new();

        // Deferred burst carrots first, in due order
        let generation = self.generation;
        self.pending.retain(|p| p.generation == generation);
        self.pending
            .sort_by(|a, b| a.due_ms.partial_cmp(&b.due_ms).unwrap_or(std::cmp::Ordering::Equal));
        let due = self.pending.iter().take_while(|p| p.due_ms <= now_ms).count();
        for _ in self.pending.drain(..due) {
            requests.push(SpawnRequest::Carrot);
        }

        if self
            .last_carrot_ms
            .is_none_or(|last| now_ms - last > difficulty.spawn_interval)
        {
            requests.push(SpawnRequest::Carrot);

            let p = difficulty.multi_spawn_probability.clamp(0.0, 1.0);
            if rng.random_bool(p) {
                self.schedule(now_ms + SECOND_SPAWN_DELAY);
                if rng.random_bool(p * 0.5) {
                    self.schedule(now_ms + THIRD_SPAWN_DELAY);
                }
                log::debug!("Multi-spawn burst at {:.0}ms ({} pending)", now_ms, self.pending.len());
            }

            self.last_carrot_ms = Some(now_ms);
        }

        if difficulty.obstacles_enabled
            && self
                .last_obstacle_ms
                .is_none_or(|last| now_ms - last > OBSTACLE_SPAWN_INTERVAL)
            && rng.random_bool(difficulty.obstacle_spawn_probability.clamp(0.0, 1.0))
        {
            requests.push(SpawnRequest::Obstacle);
            self.last_obstacle_ms = Some(now_ms);
        }

        requests
    }

    fn schedule(&mut self, due_ms: f32) {
        self.pending.push(PendingSpawn {
            due_ms,
            generation: self.generation,
        });
    }
}

/// Horizontal placement for a new carrot
///
/// Below 200 points carrots land anywhere. Later they drift from the
/// previous carrot, with a wider window from 500 points on.
pub fn carrot_x<R: Rng + ?Sized>(score: u32, last_x: Option<f32>, rng: &mut R) -> f32 {
    let max_x = SCREEN_WIDTH - CARROT_SIZE;
    let range = if score < SPEED_INCREASE {
        None
    } else if score < RAPID_INCREASE {
        Some(MID_DRIFT_RANGE)
    } else {
        Some(LATE_DRIFT_RANGE)
    };

    match (range, last_x) {
        (Some(range), Some(last_x)) => {
            let offset = (rng.random::<f32>() - 0.5) * range;
            clamp(last_x + offset, 0.0, max_x)
        }
        _ => rng.random::<f32>() * max_x,
    }
}

/// Fall speed for a new carrot: the difficulty speed plus a small jitter
pub fn carrot_speed<R: Rng + ?Sized>(difficulty: &Difficulty, rng: &mut R) -> f32 {
    let jitter = (rng.random::<f32>() - 0.5) * FALL_JITTER;
    (difficulty.fall_speed + jitter).max(0.1)
}

/// Pick a cosmetic obstacle variant (roughly 70% logs)
pub fn obstacle_kind<R: Rng + ?Sized>(rng: &mut R) -> ObstacleKind {
    if rng.random_bool(LOG_SHARE) {
        ObstacleKind::Log
    } else {
        ObstacleKind::Rock
    }
}
