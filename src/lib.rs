//! Space Shooter - simulation core of an asteroids-style arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, spawning, collisions, game state machine)
//! - `driver`: Per-frame loop tying input, simulation and rendering together
//! - `highscores`: Leaderboard and name entry collaborator
//! - `audio`: Event-driven sound triggers
//! - `assets`: Owned asset bundle handed to the rendering/audio collaborators
//! - `settings`: Data-driven configuration

pub mod assets;
pub mod audio;
pub mod driver;
pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use highscores::{HighScoreBoard, HighScoreManager, HighScorePhase};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Distance outside the screen edge where new entities appear
    pub const SPAWN_MARGIN: f32 = 50.0;

    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const BULLET_RADIUS: f32 = 3.0;
    pub const ENEMY_RADIUS: f32 = 25.0;
    pub const LARGE_ASTEROID_RADIUS: f32 = 40.0;
    pub const SMALL_ASTEROID_RADIUS: f32 = 20.0;

    /// Session defaults
    pub const STARTING_LIVES: u8 = 3;
    pub const INITIAL_ASTEROID_COUNT: usize = 4;
    pub const ENEMY_KILL_SCORE: u64 = 500;

    /// Ship handling (degrees and units per second)
    pub const SHIP_TURN_SPEED: f32 = 200.0;
    pub const SHIP_THRUST: f32 = 250.0;
    pub const SHIP_MAX_SPEED: f32 = 300.0;

    /// Projectiles
    pub const MAX_BULLETS: usize = 8;
    pub const BULLET_SPEED: f32 = 450.0;
    pub const BULLET_LIFETIME: f32 = 1.5;

    /// Enemy craft
    pub const ENEMY_SPEED: f32 = 90.0;
    pub const ENEMY_FIRE_INTERVAL: f32 = 2.0;
    pub const ENEMY_BULLET_SPEED: f32 = 250.0;
    /// Session time before the first enemy arrives
    pub const ENEMY_FIRST_SPAWN_SECS: f32 = 15.0;
    /// One-in-N chance per frame of a replacement enemy once the first has appeared
    pub const ENEMY_RESPAWN_ODDS: u32 = 600;

    /// Asteroid launch ranges
    pub const ASTEROID_MIN_SPEED: f32 = 50.0;
    pub const ASTEROID_MAX_SPEED: f32 = 100.0;
    pub const FRAGMENT_MIN_SPEED: f32 = 70.0;
    pub const FRAGMENT_MAX_SPEED: f32 = 100.0;
    pub const MAX_SPIN: f32 = 100.0;

    /// Delay before a non-qualifying game over restarts the session
    pub const GAME_OVER_PAUSE_SECS: f32 = 1.0;
}

/// Rectangular playfield with its origin in the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: consts::SCREEN_WIDTH,
            height: consts::SCREEN_HEIGHT,
        }
    }
}

impl Playfield {
    /// Non-finite or non-positive dimensions fall back to the defaults
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: usable_extent(width, consts::SCREEN_WIDTH),
            height: usable_extent(height, consts::SCREEN_HEIGHT),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True if a point lies on the visible screen (edges inclusive)
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }
}

fn usable_extent(value: f32, default: f32) -> f32 {
    if value.is_finite() && value >= 1.0 {
        value
    } else {
        log::warn!("Unusable playfield extent {value}, using {default}");
        default
    }
}

/// Wrap a position around the playfield edges.
///
/// `margin` lets a body slide fully off one edge before reappearing on the
/// opposite side, so large sprites don't pop.
#[inline]
pub fn wrap_position(pos: Vec2, field: &Playfield, margin: f32) -> Vec2 {
    Vec2::new(
        wrap_axis(pos.x, field.width, margin),
        wrap_axis(pos.y, field.height, margin),
    )
}

#[inline]
fn wrap_axis(v: f32, extent: f32, margin: f32) -> f32 {
    let lo = -margin;
    let span = extent + 2.0 * margin;
    if v < lo || v > extent + margin {
        lo + (v - lo).rem_euclid(span)
    } else {
        v
    }
}

/// Unit vector from `v`, falling back to +X when `v` is (near) zero
#[inline]
pub fn direction_or_x(v: Vec2) -> Vec2 {
    let n = v.normalize_or_zero();
    if n == Vec2::ZERO { Vec2::X } else { n }
}

/// Unit vector for a heading in degrees (0° points along +X)
#[inline]
pub fn heading_to_vec(degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians())
}
