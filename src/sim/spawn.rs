//! Spawn placement and launch parameters
//!
//! All randomness comes from the caller's RNG so a seeded session replays
//! exactly.

use glam::Vec2;
use rand::Rng;

use super::asteroid::{Asteroid, AsteroidSize};
use super::enemy::Enemy;
use crate::consts::*;
use crate::error::Result;
use crate::{Playfield, direction_or_x};

/// Screen edge a spawn comes in from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Pick a point just outside a random screen edge
pub fn offscreen_position<R: Rng + ?Sized>(rng: &mut R, field: &Playfield) -> Vec2 {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    offscreen_position_on(rng, field, edge)
}

pub fn offscreen_position_on<R: Rng + ?Sized>(rng: &mut R, field: &Playfield, edge: Edge) -> Vec2 {
    match edge {
        Edge::Top => Vec2::new(rng.random_range(0.0..field.width), -SPAWN_MARGIN),
        Edge::Right => Vec2::new(field.width + SPAWN_MARGIN, rng.random_range(0.0..field.height)),
        Edge::Bottom => Vec2::new(rng.random_range(0.0..field.width), field.height + SPAWN_MARGIN),
        Edge::Left => Vec2::new(-SPAWN_MARGIN, rng.random_range(0.0..field.height)),
    }
}

/// Unit vector from `point` to `target` (+X if they coincide)
pub fn direction_toward(point: Vec2, target: Vec2) -> Vec2 {
    direction_or_x(target - point)
}

/// Random spin in degrees per second
pub fn random_spin<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(-MAX_SPIN..=MAX_SPIN)
}

/// Initial placement and motion for a new rock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub pos: Vec2,
    pub vel: Vec2,
    pub spin: f32,
}

/// Off-screen position heading for the screen center
pub fn asteroid_launch<R: Rng + ?Sized>(rng: &mut R, field: &Playfield) -> Launch {
    let pos = offscreen_position(rng, field);
    let dir = direction_toward(pos, field.center());
    let speed = rng.random_range(ASTEROID_MIN_SPEED..=ASTEROID_MAX_SPEED);
    let spin = random_spin(rng);
    Launch {
        pos,
        vel: dir * speed,
        spin,
    }
}

/// Outward velocity and spin for one fragment of a split rock
pub fn fragment_launch<R: Rng + ?Sized>(rng: &mut R) -> (Vec2, f32) {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let speed = rng.random_range(FRAGMENT_MIN_SPEED..=FRAGMENT_MAX_SPEED);
    (Vec2::from_angle(angle) * speed, random_spin(rng))
}

pub fn spawn_large_asteroid<R: Rng + ?Sized>(rng: &mut R, field: &Playfield) -> Result<Asteroid> {
    let launch = asteroid_launch(rng, field);
    let variant = rng.random_range(0..2);
    Asteroid::new(launch.pos, launch.vel, AsteroidSize::Large, launch.spin, variant)
}

pub fn spawn_enemy<R: Rng + ?Sized>(rng: &mut R, field: &Playfield) -> Result<Enemy> {
    Enemy::new(offscreen_position(rng, field))
}

/// Why an enemy is being brought in this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyArrival {
    /// The one-shot timed introduction
    First,
    /// Random replacement after the field went empty
    Replacement,
}

/// Timed-then-random enemy introduction.
///
/// The first enemy appears once the session clock passes
/// [`ENEMY_FIRST_SPAWN_SECS`]. After that, every frame with no enemy alive is
/// an independent 1-in-[`ENEMY_RESPAWN_ODDS`] trial; there is no timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnemyIntroduction {
    latched: bool,
}

impl EnemyIntroduction {
    pub fn has_fired(&self) -> bool {
        self.latched
    }

    pub fn reset(&mut self) {
        self.latched = false;
    }

    pub fn poll<R: Rng + ?Sized>(
        &mut self,
        game_timer: f32,
        active_enemies: usize,
        rng: &mut R,
    ) -> Option<EnemyArrival> {
        if !self.latched {
            if game_timer >= ENEMY_FIRST_SPAWN_SECS {
                self.latched = true;
                return Some(EnemyArrival::First);
            }
            return None;
        }
        if active_enemies == 0 && rng.random_ratio(1, ENEMY_RESPAWN_ODDS) {
            return Some(EnemyArrival::Replacement);
        }
        None
    }
}
