//! Per-frame simulation step and top-level state machine
//!
//! Playing → (player hit, lives left) → Playing
//! Playing → (last life) → GameOver → leaderboard or short pause → new session

use super::collision::resolve_collisions;
use super::entity::Entity;
use super::ship::ShipControls;
use super::state::{GameEvent, GameOverState, GamePhase, GameState};
use crate::consts::*;
use crate::highscores::{HighScoreBoard, HighScorePhase, NameEntryInput};

/// Input snapshot for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub controls: ShipControls,
    /// Start a new game from the leaderboard
    pub restart: bool,
    /// Leave the game from the leaderboard
    pub quit: bool,
    pub name_entry: NameEntryInput,
}

/// Advance the game by one frame of `dt` seconds.
///
/// Events are appended to `state.events`; whoever observes them drains the
/// outbox (see [`crate::driver::FrameDriver::step`]).
pub fn tick(state: &mut GameState, board: &mut dyn HighScoreBoard, input: &TickInput, dt: f32) {
    // The leaderboard owns the frame while it is up
    match board.phase() {
        HighScorePhase::EnteringName => {
            board.update_name_entry(&input.name_entry);
            return;
        }
        HighScorePhase::ShowingScores => {
            board.update_showing_scores();
            if input.restart {
                board.reset();
                state.reset_session();
            } else if input.quit {
                log::info!("Quit requested from leaderboard");
                state.quit_requested = true;
            }
            return;
        }
        HighScorePhase::Normal => {}
    }

    match state.phase {
        GamePhase::Playing => step_playing(state, board, input, dt),
        GamePhase::GameOver(GameOverState::Pausing { remaining }) => {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                state.reset_session();
            } else {
                state.phase = GamePhase::GameOver(GameOverState::Pausing { remaining });
            }
        }
        GamePhase::GameOver(GameOverState::Leaderboard) => {
            // Board handed control back without a restart
            log::info!("Leaderboard closed, starting a new session");
            state.reset_session();
        }
    }
}

fn step_playing(state: &mut GameState, board: &mut dyn HighScoreBoard, input: &TickInput, dt: f32) {
    state.game_timer += dt;
    let field = state.field;

    // Player
    if state.ship.steer(&input.controls, dt) {
        state.events.push(GameEvent::ShotFired);
    }
    state.ship.advance(dt, &field);

    // Asteroids
    for asteroid in &mut state.asteroids {
        asteroid.advance(dt, &field);
    }
    state.asteroids.retain(|a| a.is_active());

    // Enemies
    if let Some(arrival) = state
        .enemy_intro
        .poll(state.game_timer, state.enemies.len(), &mut state.rng)
    {
        state.spawn_enemy(arrival);
    }
    let target = state.ship.position();
    for enemy in &mut state.enemies {
        enemy.update(dt, target, &field);
    }
    state.enemies.retain(|e| e.is_active());

    // Collisions
    let report = resolve_collisions(
        &mut state.ship,
        &mut state.asteroids,
        &mut state.enemies,
        &mut state.rng,
    );
    debug_assert!(state.score.checked_add(report.score).is_some());
    state.score = state.score.saturating_add(report.score);
    for size in &report.asteroids_destroyed {
        state.events.push(GameEvent::AsteroidDestroyed { size: *size });
    }
    for _ in 0..report.enemies_destroyed {
        state.events.push(GameEvent::EnemyDestroyed);
    }

    if let Some(cause) = report.player_hit {
        if state.player_hit(cause) {
            enter_game_over(state, board);
            return;
        }
    }

    // Keep the field populated
    if state.asteroids.is_empty() {
        log::debug!("Field cleared, spawning a new wave");
        state.spawn_asteroid_wave();
    }
}

fn enter_game_over(state: &mut GameState, board: &mut dyn HighScoreBoard) {
    let high_score = board.is_high_score(state.score);
    log::info!("Game Over! Final Score: {}", state.score);

    state.phase = if high_score {
        board.start_name_entry(state.score);
        GamePhase::GameOver(GameOverState::Leaderboard)
    } else {
        GamePhase::GameOver(GameOverState::Pausing {
            remaining: GAME_OVER_PAUSE_SECS,
        })
    };
    state.events.push(GameEvent::GameOver {
        score: state.score,
        high_score,
    });
}
