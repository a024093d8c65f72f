//! Per-frame simulation step and command handling
//!
//! The host calls `tick` once per display frame with the elapsed
//! milliseconds. Commands are applied first, then the world advances if
//! the game is Playing.

use super::collision::{carrot_caught, obstacle_hits_player};
use super::entities::{Body, Direction};
use super::spawner::SpawnRequest;
use super::state::{GameEvent, GamePhase, GameState};

/// A single input command from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start / pause / resume / continue / restart depending on phase
    PressPrimary,
    Move(Direction),
    Jump,
    ToggleMute,
    ToggleVisualFilter,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held horizontal direction
    pub direction: Direction,
    /// Jump pressed this frame
    pub jump: bool,
    /// Primary button (space) pressed this frame
    pub primary: bool,
    pub toggle_mute: bool,
    pub toggle_visual_filter: bool,
}

impl TickInput {
    /// Commands this input expands to, in application order
    pub fn commands(&self) -> Vec<Command> {
        let mut commands = Vec::new();
        if self.toggle_mute {
            commands.push(Command::ToggleMute);
        }
        if self.toggle_visual_filter {
            commands.push(Command::ToggleVisualFilter);
        }
        if self.primary {
            commands.push(Command::PressPrimary);
        }
        commands.push(Command::Move(self.direction));
        if self.jump {
            commands.push(Command::Jump);
        }
        commands
    }
}

/// Apply one command; commands that make no sense in the current phase are ignored
pub fn apply_command(state: &mut GameState, command: Command) {
    match command {
        Command::PressPrimary => press_primary(state),
        Command::Move(direction) => {
            if state.phase == GamePhase::Playing {
                state.player.move_dir(direction);
            }
        }
        Command::Jump => {
            if state.phase == GamePhase::Playing {
                state.player.jump();
            } else {
                log::debug!("Jump ignored in {:?}", state.phase);
            }
        }
        Command::ToggleMute => {
            let muted = state.settings.toggle_mute();
            state.push_event(GameEvent::MuteToggled { muted });
        }
        Command::ToggleVisualFilter => {
            let enabled = state.settings.toggle_visual_filter();
            state.push_event(GameEvent::VisualFilterToggled { enabled });
        }
    }
}

/// Context-sensitive primary action
fn press_primary(state: &mut GameState) {
    match state.phase {
        GamePhase::Title => start(state),
        GamePhase::Playing => pause(state),
        GamePhase::Paused => resume(state),
        GamePhase::HitPause => continue_after_hit(state),
        GamePhase::GameOver => restart(state),
    }
}

/// Title -> Playing with a fresh run
pub fn start(state: &mut GameState) {
    if state.phase != GamePhase::Title {
        return;
    }
    state.reset();
    state.phase = GamePhase::Playing;
    state.push_event(GameEvent::Started);
    log::info!("Run started (seed {})", state.seed);
}

/// Playing -> Paused
pub fn pause(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.phase = GamePhase::Paused;
    state.push_event(GameEvent::Paused);
    log::info!("Paused");
}

/// Paused -> Playing
pub fn resume(state: &mut GameState) {
    if state.phase != GamePhase::Paused {
        return;
    }
    state.phase = GamePhase::Playing;
    state.push_event(GameEvent::Resumed);
    log::info!("Resumed");
}

/// HitPause -> Playing, no further life lost
pub fn continue_after_hit(state: &mut GameState) {
    if state.phase != GamePhase::HitPause {
        return;
    }
    state.phase = GamePhase::Playing;
    state.hit_pause_at_ms = None;
    state.push_event(GameEvent::Continued {
        lives: state.stats.lives,
    });
}

/// GameOver -> Title with a fresh run
pub fn restart(state: &mut GameState) {
    if state.phase != GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::Title;
    state.reset();
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    for command in input.commands() {
        apply_command(state, command);
    }
    step(state, dt_ms);
}

/// Advance the world by `dt_ms` if Playing
pub fn step(state: &mut GameState, dt_ms: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let dt_ms = dt_ms.max(0.0);

    state.game_time_ms += dt_ms;
    state.time_ticks += 1;

    state.player.update(dt_ms);

    // Carrots: bag first, then ground (newest first)
    let mut i = state.carrots.len();
    while i > 0 {
        i -= 1;
        let carrot = &mut state.carrots[i];
        carrot.update(dt_ms);

        if carrot_caught(&state.player, carrot) {
            let carrot = state.carrots.remove(i);
            state.on_carrot_caught(&carrot);
        } else if carrot.is_grounded() {
            let carrot = state.carrots.remove(i);
            state.on_carrot_missed(&carrot);
        }
    }

    // Obstacles (newest first)
    let mut i = state.obstacles.len();
    while i > 0 {
        i -= 1;
        let obstacle = &mut state.obstacles[i];
        obstacle.update(dt_ms);

        if obstacle_hits_player(&state.player, obstacle) {
            let obstacle = state.obstacles.remove(i);
            state.on_obstacle_hit(&obstacle);
        } else if obstacle.is_off_screen() {
            state.obstacles.remove(i);
        }
    }

    for particle in state.particles.iter_mut() {
        particle.update(dt_ms);
    }
    state.particles.retain(|p| !p.is_dead());

    let difficulty = state.difficulty();
    let requests = state
        .spawner
        .poll(state.game_time_ms, &difficulty, &mut state.rng);
    for request in requests {
        match request {
            SpawnRequest::Carrot => state.spawn_carrot(),
            SpawnRequest::Obstacle => state.spawn_obstacle(),
        }
    }

    state.update_level();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::collision::catch_zone;
    use crate::sim::entities::{Carrot, Obstacle, ObstacleKind};

    const DT: f32 = 16.0;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed, 0);
        apply_command(&mut state, Command::PressPrimary);
        state.events.clear();
        state
    }

    fn carrot_over_bag(state: &mut GameState) -> u32 {
        let zone = catch_zone(&state.player);
        let id = state.next_entity_id();
        let mut carrot = Carrot::new(id, zone.left() + 12.0, 0.0);
        carrot.pos.y = zone.top() - 4.0;
        state.carrots.push(carrot);
        id
    }

    fn has_carrot(state: &GameState, id: u32) -> bool {
        state.carrots.iter().any(|c| c.id == id)
    }

    fn obstacle_on_player(state: &mut GameState) {
        let id = state.next_entity_id();
        let mut obstacle = Obstacle::new(id, ObstacleKind::Log, 0.0);
        obstacle.pos.x = state.player.pos.x + 4.0;
        state.obstacles.push(obstacle);
    }

    #[test]
    fn test_tick_title_to_playing() {
        let mut state = GameState::new(12345, 0);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.time_ticks, 0);

        let input = TickInput {
            primary: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = playing(12345);
        let input = TickInput {
            primary: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.phase, GamePhase::Paused);
        let frozen = state.game_time_ms;

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.game_time_ms, frozen);

        tick(&mut state, &input, DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.game_time_ms > frozen);
    }

    #[test]
    fn test_jump_ignored_while_paused() {
        let mut state = playing(1);
        apply_command(&mut state, Command::PressPrimary);
        apply_command(&mut state, Command::Jump);
        assert!(state.player.on_ground);
        assert_eq!(state.player.vel_y, 0.0);
    }

    #[test]
    fn test_catch_scores() {
        let mut state = playing(1);
        let id = carrot_over_bag(&mut state);
        step(&mut state, DT);
        assert!(!has_carrot(&state, id));
        assert_eq!(state.stats.score, POINTS_PER_CATCH);
        assert_eq!(state.stats.combo, 1);
        assert_eq!(state.stats.caught, 1);
    }

    #[test]
    fn test_ground_drop_breaks_combo_only() {
        let mut state = playing(1);
        carrot_over_bag(&mut state);
        step(&mut state, DT);
        carrot_over_bag(&mut state);
        step(&mut state, DT);
        assert_eq!(state.stats.combo, 2);

        let id = state.next_entity_id();
        let mut carrot = Carrot::new(id, 10.0, 0.0);
        carrot.pos.y = GROUND_Y + 1.0;
        state.carrots.push(carrot);
        step(&mut state, DT);

        assert!(!has_carrot(&state, id));
        assert_eq!(state.stats.combo, 0);
        assert_eq!(state.stats.max_combo, 2);
        assert_eq!(state.stats.lives, START_LIVES);
    }

    #[test]
    fn test_hit_with_spare_lives_enters_hit_pause() {
        let mut state = playing(1);
        state.stats.lives = 2;
        obstacle_on_player(&mut state);
        step(&mut state, DT);
        assert_eq!(state.phase, GamePhase::HitPause);
        assert_eq!(state.stats.lives, 1);
        assert!(state.obstacles.is_empty());
        assert!(state.hit_pause_at_ms.is_some());

        apply_command(&mut state, Command::PressPrimary);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.stats.lives, 1);
        assert!(state.hit_pause_at_ms.is_none());
    }

    #[test]
    fn test_last_life_goes_straight_to_game_over() {
        let mut state = playing(1);
        state.stats.lives = 1;
        state.stats.score = 70;
        obstacle_on_player(&mut state);
        step(&mut state, DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.stats.lives, 0);
        assert_eq!(state.best_score, 70);
    }

    #[test]
    fn test_obstacle_leaves_screen() {
        let mut state = playing(1);
        let id = state.next_entity_id();
        let mut obstacle = Obstacle::new(id, ObstacleKind::Rock, 5.0);
        obstacle.pos.x = -OBSTACLE_WIDTH + 1.0;
        state.obstacles.push(obstacle);
        step(&mut state, DT);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.stats.lives, START_LIVES);
    }

    #[test]
    fn test_restart_returns_to_title_clean() {
        let mut state = playing(1);
        state.stats.lives = 1;
        state.stats.score = 120;
        carrot_over_bag(&mut state);
        obstacle_on_player(&mut state);
        step(&mut state, DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        apply_command(&mut state, Command::PressPrimary);
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.stats.score, 0);
        assert_eq!(state.stats.lives, START_LIVES);
        assert!(state.carrots.is_empty());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.best_score, 130);
    }

    #[test]
    fn test_first_carrot_on_first_frame() {
        let mut state = playing(3);
        step(&mut state, DT);
        assert_eq!(state.stats.spawned, 1);
        assert_eq!(state.carrots.len(), 1);

        // Second wave waits for the full interval
        let mut elapsed = 0.0;
        while state.stats.spawned == 1 {
            step(&mut state, DT);
            elapsed += DT;
            assert!(elapsed < 3000.0);
        }
        assert!(elapsed > BASE_SPAWN_INTERVAL);
    }

    #[test]
    fn test_reset_makes_first_wave_due_again() {
        let mut state = playing(3);
        for _ in 0..10 {
            step(&mut state, DT);
        }
        assert_eq!(state.stats.spawned, 1);

        state.reset();
        state.events.clear();
        step(&mut state, DT);
        assert_eq!(state.stats.spawned, 1);
        assert_eq!(state.carrots.len(), 1);
    }

    #[test]
    fn test_toggles_work_in_any_phase() {
        let mut state = GameState::new(1, 0);
        let input = TickInput {
            toggle_mute: true,
            toggle_visual_filter: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!(state.settings.muted);
        assert!(state.settings.visual_filter);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::MuteToggled { muted: true },
                GameEvent::VisualFilterToggled { enabled: true }
            ]
        );
    }

    #[test]
    fn test_determinism() {
        let mut state1 = playing(99999);
        let mut state2 = playing(99999);
        state1.stats.score = 350;
        state2.stats.score = 350;

        let inputs = [
            TickInput {
                direction: Direction::Left,
                ..Default::default()
            },
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput {
                direction: Direction::Right,
                ..Default::default()
            },
        ];

        for frame in 0..2000 {
            let input = &inputs[frame % inputs.len()];
            tick(&mut state1, input, DT);
            tick(&mut state2, input, DT);
        }

        assert_eq!(state1.stats, state2.stats);
        assert_eq!(state1.carrots.len(), state2.carrots.len());
        for (a, b) in state1.carrots.iter().zip(&state2.carrots) {
            assert_eq!(a.pos, b.pos);
        }
        assert_eq!(state1.player.pos, state2.player.pos);
    }
}
