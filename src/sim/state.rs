//! Game session state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::{Asteroid, AsteroidSize};
use super::collision::HitCause;
use super::enemy::Enemy;
use super::entity::{Armed, Entity};
use super::ship::Ship;
use super::spawn::{self, EnemyArrival, EnemyIntroduction};
use crate::Playfield;
use crate::consts::*;

/// Why the session is over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameOverState {
    /// Score didn't make the leaderboard: brief pause, then a new session
    Pausing { remaining: f32 },
    /// The leaderboard took over (name entry, then score display)
    Leaderboard,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    GameOver(GameOverState),
}

/// Things that happened during a tick, for audio and other observers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    ShotFired,
    AsteroidDestroyed { size: AsteroidSize },
    EnemyArrived,
    EnemyDestroyed,
    PlayerHit { cause: HitCause, lives_left: u8 },
    GameOver { score: u64, high_score: bool },
}

/// Complete state of one play session plus the RNG that drives it
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub field: Playfield,
    pub score: u64,
    pub lives: u8,
    /// Seconds since the session started
    pub game_timer: f32,
    pub phase: GamePhase,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub enemies: Vec<Enemy>,
    /// Events not yet consumed by an observer
    pub events: Vec<GameEvent>,
    /// Set when the player asked to leave from the leaderboard
    pub quit_requested: bool,
    pub(crate) enemy_intro: EnemyIntroduction,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Start a new session on the given playfield
    pub fn new(seed: u64, field: Playfield) -> Self {
        let mut state = Self {
            seed,
            field,
            score: 0,
            lives: STARTING_LIVES,
            game_timer: 0.0,
            phase: GamePhase::Playing,
            ship: Ship::new(field.center()),
            asteroids: Vec::new(),
            enemies: Vec::new(),
            events: Vec::new(),
            quit_requested: false,
            enemy_intro: EnemyIntroduction::default(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset_session();
        state
    }

    /// Throw away the current session and start over.
    ///
    /// The RNG keeps its stream so consecutive sessions differ.
    pub fn reset_session(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.game_timer = 0.0;
        self.enemy_intro.reset();
        self.phase = GamePhase::Playing;
        self.quit_requested = false;
        self.ship = Ship::new(self.field.center());
        self.asteroids.clear();
        self.enemies.clear();
        self.spawn_asteroid_wave();
        self.events.push(GameEvent::SessionStarted);
        log::info!("New session started (seed {})", self.seed);
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    /// True once the timed first enemy has appeared this session
    pub fn enemy_spawned(&self) -> bool {
        self.enemy_intro.has_fired()
    }

    /// Spawn a fresh batch of large asteroids
    pub fn spawn_asteroid_wave(&mut self) {
        if !self.is_playing() {
            log::debug!("Ignoring asteroid wave outside of play");
            return;
        }
        for _ in 0..INITIAL_ASTEROID_COUNT {
            match spawn::spawn_large_asteroid(&mut self.rng, &self.field) {
                Ok(asteroid) => self.asteroids.push(asteroid),
                Err(e) => log::warn!("Skipped asteroid: {e}"),
            }
        }
    }

    /// Bring in an enemy at a random off-screen position
    pub fn spawn_enemy(&mut self, arrival: EnemyArrival) {
        if !self.is_playing() {
            return;
        }
        match spawn::spawn_enemy(&mut self.rng, &self.field) {
            Ok(enemy) => {
                if arrival == EnemyArrival::First {
                    log::info!("Enemy arrived after {:.1}s", self.game_timer);
                } else {
                    log::debug!("Replacement enemy arrived");
                }
                self.enemies.push(enemy);
                self.events.push(GameEvent::EnemyArrived);
            }
            Err(e) => log::warn!("Skipped enemy: {e}"),
        }
    }

    /// Take a life and put a fresh ship in the middle of the screen.
    ///
    /// Returns true if that was the last life. No-op outside of play.
    pub fn player_hit(&mut self, cause: HitCause) -> bool {
        if !self.is_playing() {
            return false;
        }
        debug_assert!(self.lives > 0, "player hit with no lives left");
        self.lives = self.lives.saturating_sub(1);
        self.ship = Ship::new(self.field.center());
        self.events.push(GameEvent::PlayerHit {
            cause,
            lives_left: self.lives,
        });
        log::info!("Player hit ({cause:?})! Lives remaining: {}", self.lives);
        self.lives == 0
    }

    pub fn ship_position(&self) -> Vec2 {
        self.ship.position()
    }

    /// Serializable summary for HUDs and tooling
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            score: self.score,
            lives: self.lives,
            game_timer: self.game_timer,
            phase: self.phase,
            enemy_spawned: self.enemy_spawned(),
            asteroids: self.asteroids.len(),
            enemies: self.enemies.len(),
            player_bullets: self.ship.gun().len(),
        }
    }
}

/// Plain-data view of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub score: u64,
    pub lives: u8,
    pub game_timer: f32,
    pub phase: GamePhase,
    pub enemy_spawned: bool,
    pub asteroids: usize,
    pub enemies: usize,
    pub player_bullets: usize,
}
