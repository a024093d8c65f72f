//! Game entities: the player, falling carrots, ground obstacles and particles
//!
//! Each entity owns its own position and size; there is no shared base.
//! Positions are top-left corners in screen space (+y down).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::clamp;
use crate::consts::*;

/// Anything that moves each frame and occupies a rectangle
pub trait Body {
    /// Advance by one frame that lasted `dt_ms` milliseconds
    fn update(&mut self, dt_ms: f32);
    /// Current bounding box
    fn bounds(&self) -> Rect;
}

/// Horizontal input direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    None,
    Right,
}

impl Direction {
    /// Sign of the direction (-1, 0, 1)
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::None => 0.0,
            Direction::Right => 1.0,
        }
    }
}

/// The player's bunny
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed (pixels/frame)
    pub speed: f32,
    /// Vertical velocity (pixels/frame, negative is up)
    pub vel_y: f32,
    pub direction: Direction,
    pub on_ground: bool,
    /// Cleared on jump, restored only on landing
    pub can_jump: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Create a player standing on the ground line at the horizontal center
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(
                SCREEN_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
                GROUND_Y - PLAYER_HEIGHT,
            ),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: PLAYER_SPEED,
            vel_y: 0.0,
            direction: Direction::None,
            on_ground: true,
            can_jump: true,
        }
    }

    /// Resting y coordinate (feet on the ground line)
    #[inline]
    pub fn ground_y(&self) -> f32 {
        GROUND_Y - self.size.y
    }

    /// Set the horizontal direction; applied on the next update
    pub fn move_dir(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Jump if grounded and the jump has been re-armed by a landing
    pub fn jump(&mut self) -> bool {
        if self.can_jump && self.on_ground {
            self.vel_y = -JUMP_POWER;
            self.on_ground = false;
            self.can_jump = false;
            true
        } else {
            false
        }
    }
}

impl Body for Player {
    fn update(&mut self, _dt_ms: f32) {
        self.pos.x += self.direction.sign() * self.speed;

        if !self.on_ground {
            self.vel_y += GRAVITY;
            self.pos.y += self.vel_y;

            let ground = self.ground_y();
            if self.pos.y >= ground {
                self.pos.y = ground;
                self.vel_y = 0.0;
                self.on_ground = true;
                self.can_jump = true;
            }
        }

        self.pos.x = clamp(self.pos.x, 0.0, SCREEN_WIDTH - self.size.x);
    }

    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A falling carrot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Carrot {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Fall speed (scaled by dt * MOTION_SCALE)
    pub speed: f32,
}

impl Carrot {
    /// Create a carrot just above the top of the screen
    pub fn new(id: u32, x: f32, speed: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(x, -CARROT_SIZE),
            size: Vec2::splat(CARROT_SIZE),
            speed,
        }
    }

    /// True once the top edge has passed the ground line
    pub fn is_grounded(&self) -> bool {
        self.pos.y > GROUND_Y
    }
}

impl Body for Carrot {
    fn update(&mut self, dt_ms: f32) {
        self.pos.y += self.speed * dt_ms * MOTION_SCALE;
    }

    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Obstacle variants; cosmetic only, both collide the same way
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleKind {
    #[default]
    Log,
    Rock,
}

/// A ground obstacle sliding in from the right
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Leftward speed (pixels/frame)
    pub speed: f32,
}

impl Obstacle {
    /// Create an obstacle at the right screen edge, resting on the ground line
    pub fn new(id: u32, kind: ObstacleKind, speed: f32) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::new(SCREEN_WIDTH, GROUND_Y - OBSTACLE_HEIGHT),
            size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            speed: speed.max(0.0),
        }
    }

    /// True once the right edge has left the screen
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

impl Body for Obstacle {
    fn update(&mut self, _dt_ms: f32) {
        self.pos.x -= self.speed;
    }

    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Particle palette tag for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Carrot,
    Ground,
    Shadow,
    Ui,
}

/// Side length of a particle square
pub const PARTICLE_SIZE: f32 = 2.0;

/// A particle for visual effects (not gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime (ms)
    pub life: f32,
    /// Initial lifetime (ms)
    pub max_life: f32,
    pub color: ParticleColor,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, life: f32, color: ParticleColor) -> Self {
        Self {
            pos,
            vel,
            life,
            max_life: life,
            color,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }

    /// Fade factor in [0, 1]
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

impl Body for Particle {
    fn update(&mut self, dt_ms: f32) {
        self.pos += self.vel * dt_ms * MOTION_SCALE;
        self.life -= dt_ms;
    }

    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::splat(PARTICLE_SIZE),
        }
    }
}
