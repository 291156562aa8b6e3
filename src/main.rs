//! Space Shooter entry point
//!
//! Runs the simulation headless under a simple autopilot. A windowed front
//! end plugs its own input source, clock and renderer into the same driver.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::Rng;

use space_shooter::assets::AssetBundle;
use space_shooter::audio::{AudioManager, NullAudio};
use space_shooter::driver::{FixedClock, FrameDriver, FrameInput, InputSource};
use space_shooter::highscores::{HighScoreBoard, HighScoreManager, HighScorePhase, NameEntryInput};
use space_shooter::sim::{Entity, GameState};
use space_shooter::Settings;

#[derive(Debug, Parser)]
#[command(name = "space-shooter", about = "Asteroids-style arcade simulation")]
struct Cli {
    /// Settings file (JSON)
    #[arg(long, default_value = "settings.json")]
    config: PathBuf,

    /// RNG seed, overrides the settings file
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many frames
    #[arg(long, default_value_t = 36_000)]
    frames: u64,

    /// Print the final session snapshot as JSON
    #[arg(long)]
    json: bool,
}

/// Turns toward the nearest asteroid and keeps shooting
#[derive(Debug, Default)]
struct Autopilot {
    frame: u64,
    name_typed: bool,
}

impl Autopilot {
    const NAME: [char; 3] = ['B', 'O', 'T'];
    /// Degrees of slack before the ship bothers turning
    const AIM_TOLERANCE: f32 = 6.0;

    fn fly(&self, state: &GameState, frame: &mut FrameInput) {
        let ship = state.ship_position();
        let Some(target) = state
            .asteroids
            .iter()
            .map(|a| a.position())
            .min_by(|a, b| a.distance_squared(ship).total_cmp(&b.distance_squared(ship)))
        else {
            return;
        };

        let to_target = target - ship;
        let wanted = to_target.y.atan2(to_target.x).to_degrees();
        let diff = (wanted - state.ship.rotation() + 540.0).rem_euclid(360.0) - 180.0;

        let controls = &mut frame.tick.controls;
        controls.turn_right = diff > Self::AIM_TOLERANCE;
        controls.turn_left = diff < -Self::AIM_TOLERANCE;
        controls.fire = self.frame % 2 == 0;
        controls.thrust = to_target.length() > 250.0 && state.ship.velocity().length() < 60.0;
    }
}

impl InputSource<HighScoreManager> for Autopilot {
    fn poll(&mut self, state: &GameState, board: &HighScoreManager) -> FrameInput {
        self.frame += 1;
        let mut frame = FrameInput::default();
        match board.phase() {
            HighScorePhase::EnteringName if !self.name_typed => {
                self.name_typed = true;
                frame.tick.name_entry = NameEntryInput {
                    typed: Self::NAME.to_vec(),
                    ..Default::default()
                };
            }
            HighScorePhase::EnteringName => {
                self.name_typed = false;
                frame.tick.name_entry.confirm = true;
            }
            HighScorePhase::ShowingScores => frame.tick.quit = true,
            HighScorePhase::Normal if state.is_playing() => self.fly(state, &mut frame),
            HighScorePhase::Normal => {}
        }
        frame
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = Settings::load_or_default(&cli.config);
    let seed = cli
        .seed
        .or(settings.seed)
        .unwrap_or_else(|| rand::rng().random());
    log::info!("Space Shooter (headless) starting, seed {seed}");

    let assets = AssetBundle::load(&settings.assets);
    let audio = AudioManager::new(NullAudio, assets, &settings);
    let board = HighScoreManager::open(settings.high_score_path.clone());
    let state = GameState::new(seed, settings.playfield());

    let mut driver = FrameDriver::new(state, board, audio).with_frame_limit(cli.frames);
    let mut clock = FixedClock {
        dt: settings.frame_dt(),
    };
    let reason = driver.run(&mut Autopilot::default(), &mut clock, |state, _| {
        log::trace!(
            "t={:.2} score={} lives={} asteroids={}",
            state.game_timer,
            state.score,
            state.lives,
            state.asteroids.len()
        );
    });

    let snapshot = driver.state.snapshot();
    if cli.json {
        let json = serde_json::to_string_pretty(&snapshot).context("serializing snapshot")?;
        println!("{json}");
    } else {
        println!(
            "Stopped ({reason:?}) after {} frames: score {}, lives {}, {:.1}s played",
            driver.frames(),
            snapshot.score,
            snapshot.lives,
            snapshot.game_timer
        );
        if let Some(best) = driver.board.scores().top_score() {
            println!("Best on record: {best}");
        }
    }
    Ok(())
}
