//! Frame driver
//!
//! One frame: sample dt → one simulation tick → audio → render. Rendering
//! only ever sees shared references.

use std::time::Instant;

use crate::audio::{AudioBackend, AudioManager};
use crate::highscores::HighScoreBoard;
use crate::sim::{GameState, TickInput, tick};

/// Longest frame the simulation will integrate in one go (stalls, debuggers)
pub const MAX_FRAME_DT: f32 = 0.1;

/// Input for one frame, including the window-level close signal
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub tick: TickInput,
    pub should_close: bool,
}

/// Polled once per frame
pub trait InputSource<B: HighScoreBoard> {
    fn poll(&mut self, state: &GameState, board: &B) -> FrameInput;
}

/// Supplies the elapsed time of each frame
pub trait FrameClock {
    fn frame_time(&mut self) -> f32;
}

/// Constant step, for headless runs and tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub dt: f32,
}

impl FrameClock for FixedClock {
    fn frame_time(&mut self) -> f32 {
        self.dt
    }
}

/// Real elapsed time between calls
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    last: Instant,
}

impl Default for WallClock {
    fn default() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl FrameClock for WallClock {
    fn frame_time(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The window/host asked us to close
    Closed,
    /// The player chose quit on the leaderboard
    Quit,
    /// Frame budget exhausted
    FrameLimit,
}

pub struct FrameDriver<B: HighScoreBoard, A: AudioBackend> {
    pub state: GameState,
    pub board: B,
    pub audio: AudioManager<A>,
    frames: u64,
    max_frames: Option<u64>,
}

impl<B: HighScoreBoard, A: AudioBackend> FrameDriver<B, A> {
    pub fn new(state: GameState, board: B, audio: AudioManager<A>) -> Self {
        Self {
            state,
            board,
            audio,
            frames: 0,
            max_frames: None,
        }
    }

    /// Stop after this many frames
    pub fn with_frame_limit(mut self, max_frames: u64) -> Self {
        self.max_frames = Some(max_frames);
        self
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run a single frame. Returns `Some` when the loop should stop.
    pub fn step(
        &mut self,
        input: &mut impl InputSource<B>,
        clock: &mut impl FrameClock,
        render: &mut impl FnMut(&GameState, &B),
    ) -> Option<StopReason> {
        if self.max_frames.is_some_and(|max| self.frames >= max) {
            return Some(StopReason::FrameLimit);
        }

        let frame = input.poll(&self.state, &self.board);
        if frame.should_close {
            return Some(StopReason::Closed);
        }

        let dt = clock.frame_time().clamp(0.0, MAX_FRAME_DT);
        tick(&mut self.state, &mut self.board, &frame.tick, dt);
        self.audio.update_music();
        self.audio.handle_events(&self.state.events);
        render(&self.state, &self.board);
        self.state.events.clear();
        self.frames += 1;

        self.state.quit_requested.then_some(StopReason::Quit)
    }

    /// Run frames until closed, quit, or out of budget
    pub fn run(
        &mut self,
        input: &mut impl InputSource<B>,
        clock: &mut impl FrameClock,
        mut render: impl FnMut(&GameState, &B),
    ) -> StopReason {
        loop {
            if let Some(reason) = self.step(input, clock, &mut render) {
                log::info!("Frame driver stopped after {} frames: {reason:?}", self.frames);
                return reason;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Playfield;
    use crate::assets::AssetBundle;
    use crate::audio::NullAudio;
    use crate::highscores::{HighScoreManager, HighScorePhase, NameEntryInput};
    use crate::settings::Settings;
    use crate::sim::{GameEvent, GameOverState, GamePhase};

    fn driver(seed: u64) -> FrameDriver<HighScoreManager, NullAudio> {
        let audio = AudioManager::new(NullAudio, AssetBundle::default(), &Settings::default());
        FrameDriver::new(
            GameState::new(seed, Playfield::default()),
            HighScoreManager::new(),
            audio,
        )
    }

    struct Idle;

    impl InputSource<HighScoreManager> for Idle {
        fn poll(&mut self, _: &GameState, _: &HighScoreManager) -> FrameInput {
            FrameInput::default()
        }
    }

    /// Confirms name entry, then quits from the score table
    struct Leaver;

    impl InputSource<HighScoreManager> for Leaver {
        fn poll(&mut self, _: &GameState, board: &HighScoreManager) -> FrameInput {
            let mut frame = FrameInput::default();
            match board.phase() {
                HighScorePhase::EnteringName => {
                    frame.tick.name_entry = NameEntryInput {
                        confirm: true,
                        ..Default::default()
                    }
                }
                HighScorePhase::ShowingScores => frame.tick.quit = true,
                HighScorePhase::Normal => {}
            }
            frame
        }
    }

    struct CloseAfter(u32);

    impl InputSource<HighScoreManager> for CloseAfter {
        fn poll(&mut self, _: &GameState, _: &HighScoreManager) -> FrameInput {
            let should_close = self.0 == 0;
            self.0 = self.0.saturating_sub(1);
            FrameInput {
                should_close,
                ..Default::default()
            }
        }
    }

    #[test]
    fn test_frame_limit() {
        let mut driver = driver(1).with_frame_limit(10);
        let mut rendered = 0;
        let reason = driver.run(&mut Idle, &mut FixedClock { dt: 1.0 / 60.0 }, |_, _| rendered += 1);
        assert_eq!(reason, StopReason::FrameLimit);
        assert_eq!(rendered, 10);
        assert_eq!(driver.frames(), 10);
    }

    #[test]
    fn test_close_signal_stops_before_tick() {
        let mut driver = driver(2);
        let reason = driver.run(&mut CloseAfter(3), &mut FixedClock { dt: 1.0 / 60.0 }, |_, _| {});
        assert_eq!(reason, StopReason::Closed);
        assert_eq!(driver.frames(), 3);
    }

    #[test]
    fn test_first_frame_sees_session_start() {
        let mut driver = driver(5).with_frame_limit(2);
        let mut seen = Vec::new();
        driver.run(&mut Idle, &mut FixedClock { dt: 1.0 / 60.0 }, |state, _| {
            seen.push(state.events.contains(&GameEvent::SessionStarted));
        });
        assert_eq!(seen, vec![true, false]);
        assert!(driver.state.events.is_empty());
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut driver = driver(3).with_frame_limit(1);
        driver.run(&mut Idle, &mut FixedClock { dt: 5.0 }, |_, _| {});
        assert!((driver.state.game_timer - MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn test_quit_from_leaderboard_stops_loop() {
        let mut driver = driver(4).with_frame_limit(1000);
        driver.state.score = 700;
        driver.board.start_name_entry(700);
        driver.state.phase = GamePhase::GameOver(GameOverState::Leaderboard);

        let reason = driver.run(&mut Leaver, &mut FixedClock { dt: 1.0 / 60.0 }, |_, _| {});

        assert_eq!(reason, StopReason::Quit);
        assert_eq!(driver.frames(), 2);
        assert_eq!(driver.board.scores().top_score(), Some(700));
    }
}
