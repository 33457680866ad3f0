//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Which wall a collision happened against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
    Top,
    Bottom,
}

/// Discrete side effects produced by a tick.
///
/// The core returns these as a command list; the presentation layer decides
/// how (or whether) to realize them as sounds and particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball bounced off a wall. `at` is the ball center, for particle spawns.
    WallHit { side: WallSide, at: Vec2 },
    /// Cat contact or trigger-phrase launch
    Meow,
}

/// Viewport bounds the ball is confined to.
///
/// Caller precondition: both dimensions exceed the ball diameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest x the ball's top-left corner may take
    pub fn max_x(&self) -> f32 {
        self.width - BALL_RADIUS * 2.0
    }

    /// Largest y the ball's top-left corner may take
    pub fn max_y(&self) -> f32 {
        self.height - BALL_RADIUS * 2.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The ball entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    /// Top-left corner in viewport pixels
    pub pos: Vec2,
    /// Velocity in pixels per tick
    pub vel: Vec2,
    /// While true, position is driven by the drag session and gravity is off
    pub dragging: bool,
}

impl Ball {
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(BALL_RADIUS)
    }
}

/// Cat hitbox geometry, read from the presentation layer each tick.
///
/// The core only uses the center; width/height are carried so the glue can
/// report the rectangle it actually rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatHitbox {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
}

/// Rolling buffer of the most recently typed characters, matched against
/// the trigger phrase.
///
/// Multi-character key names (e.g. `ArrowLeft`) contribute all of their
/// characters; only the trailing [`KeyBuffer::CAPACITY`] survive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyBuffer {
    chars: String,
}

impl KeyBuffer {
    /// Trigger phrase length
    pub const CAPACITY: usize = 4;

    /// Append a lower-cased key name, keeping only the trailing characters
    pub fn push(&mut self, key: &str) {
        for c in key.chars() {
            self.chars.extend(c.to_lowercase());
        }
        let count = self.chars.chars().count();
        if count > Self::CAPACITY {
            self.chars = self.chars.chars().skip(count - Self::CAPACITY).collect();
        }
    }

    /// True when the buffer spells the trigger phrase
    pub fn matches_trigger(&self) -> bool {
        self.chars == TRIGGER_PHRASE
    }

    pub fn clear(&mut self) {
        self.chars.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.chars
    }
}

/// Complete game state, exclusively owned by the core.
///
/// The presentation layer sees read-only snapshots between ticks.
#[derive(Debug, Clone)]
pub struct GameState {
    pub ball: Ball,
    /// Wall bounces since the last reset
    pub score: u32,
    /// Freezes physics integration; input handling stays live
    pub paused: bool,
    /// Trigger-phrase detector state
    pub typed: KeyBuffer,
    /// Seeded RNG for the trigger-phrase launch velocity
    pub rng: Pcg32,
}

impl GameState {
    /// Create a fresh state with the ball at the viewport center
    pub fn new(seed: u64, bounds: &Bounds) -> Self {
        let mut state = Self {
            ball: Ball {
                pos: bounds.center(),
                vel: Vec2::new(RESET_VX, RESET_VY),
                dragging: false,
            },
            score: 0,
            paused: false,
            typed: KeyBuffer::default(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset(bounds);
        state
    }

    /// Put the ball back at the center with the starting velocity,
    /// zero the score, and unpause
    pub fn reset(&mut self, bounds: &Bounds) {
        self.ball.pos = bounds.center();
        self.ball.vel = Vec2::new(RESET_VX, RESET_VY);
        self.score = 0;
        self.paused = false;
    }
}
