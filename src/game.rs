//! Game facade
//!
//! Owns the simulation state and the best-score store. Hosts drive it with
//! `update` once per frame and read `snapshot` to render.

use crate::best_score::{BestScore, ScoreStore};
use crate::sim::snapshot::{self, Snapshot};
use crate::sim::state::{GameEvent, GamePhase, GameState};
use crate::sim::tick::{self, Command, TickInput};

/// A running game session
pub struct Game<S: ScoreStore> {
    state: GameState,
    best: BestScore,
    store: S,
}

impl<S: ScoreStore> Game<S> {
    /// Create a session on the title screen, reading the best score once
    pub fn new(seed: u64, store: S) -> Self {
        let best = BestScore::load(&store);
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::new(seed, best.get()),
            best,
            store,
        }
    }

    /// Advance one frame; returns the events it produced
    pub fn update(&mut self, input: &TickInput, dt_ms: f32) -> Vec<GameEvent> {
        tick::tick(&mut self.state, input, dt_ms);
        self.flush_events()
    }

    /// Apply a single command outside the frame loop
    pub fn command(&mut self, command: Command) -> Vec<GameEvent> {
        tick::apply_command(&mut self.state, command);
        self.flush_events()
    }

    /// Persist the best score when a run beats it
    fn flush_events(&mut self) -> Vec<GameEvent> {
        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::GameOver {
                score,
                new_best: true,
            } = *event
            {
                if self.best.submit(score) {
                    self.best.save(&mut self.store);
                }
            }
        }
        events
    }

    pub fn snapshot(&self) -> Snapshot {
        snapshot::build(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn score(&self) -> u32 {
        self.state.stats.score
    }

    pub fn lives(&self) -> u32 {
        self.state.stats.lives
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn best_score(&self) -> u32 {
        self.best.get()
    }

    pub fn pause(&mut self) -> Vec<GameEvent> {
        tick::pause(&mut self.state);
        self.flush_events()
    }

    pub fn resume(&mut self) -> Vec<GameEvent> {
        tick::resume(&mut self.state);
        self.flush_events()
    }

    /// Clear the current run without changing phase
    pub fn reset(&mut self) -> Vec<GameEvent> {
        self.state.reset();
        self.flush_events()
    }
}
