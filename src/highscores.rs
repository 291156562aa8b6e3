//! High score leaderboard and name entry
//!
//! The simulation only talks to this through [`HighScoreBoard`]. The
//! concrete [`HighScoreManager`] keeps a top-10 table persisted as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Maximum characters in a leaderboard name
pub const MAX_NAME_LEN: usize = 3;

/// Name stored when the player confirms without typing anything
pub const ANONYMOUS_NAME: &str = "---";

/// Where the leaderboard collaborator is in its own flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HighScorePhase {
    /// Not involved; the game is running
    #[default]
    Normal,
    EnteringName,
    ShowingScores,
}

/// Name entry keys for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameEntryInput {
    /// Characters typed this frame, in order
    pub typed: Vec<char>,
    pub backspace: bool,
    pub confirm: bool,
}

/// Phase source/sink the game state machine drives on game over
pub trait HighScoreBoard {
    /// Would this score earn a place on the board?
    fn is_high_score(&self, score: u64) -> bool;
    /// Begin asking for the player's name for `score`
    fn start_name_entry(&mut self, score: u64);
    fn phase(&self) -> HighScorePhase;
    fn update_name_entry(&mut self, input: &NameEntryInput);
    fn update_showing_scores(&mut self);
    /// Leave the score display and hand control back to the game
    fn reset(&mut self);
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, name: &str, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
        };

        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load a leaderboard from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| GameError::io(path, e))?;
        let mut scores: HighScores =
            serde_json::from_str(&json).map_err(|e| GameError::json(path, e))?;
        // Hand-edited files may be out of order or oversized
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        Ok(scores)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| GameError::json(path, e))?;
        fs::write(path, json).map_err(|e| GameError::io(path, e))
    }
}

/// Leaderboard plus the name-entry/display flow around it
#[derive(Debug, Clone, Default)]
pub struct HighScoreManager {
    scores: HighScores,
    phase: HighScorePhase,
    pending_score: u64,
    /// Rank the pending score will take, shown during name entry
    pending_rank: Option<usize>,
    name: String,
    /// Rank of the entry just recorded, for highlighting
    last_rank: Option<usize>,
    /// Frames spent on the score display (drives prompt blinking)
    display_frames: u32,
    path: Option<PathBuf>,
}

impl HighScoreManager {
    /// In-memory board that never touches disk
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scores(scores: HighScores) -> Self {
        Self {
            scores,
            ..Self::default()
        }
    }

    /// Board backed by a JSON file. A missing or unreadable file starts fresh.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores = if path.exists() {
            match HighScores::load(&path) {
                Ok(scores) => {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    scores
                }
                Err(e) => {
                    log::warn!("{e}; starting with an empty leaderboard");
                    HighScores::new()
                }
            }
        } else {
            log::info!("No high scores found, starting fresh");
            HighScores::new()
        };
        Self {
            scores,
            path: Some(path),
            ..Self::default()
        }
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    /// Name typed so far
    pub fn current_name(&self) -> &str {
        &self.name
    }

    pub fn pending_score(&self) -> u64 {
        self.pending_score
    }

    pub fn pending_rank(&self) -> Option<usize> {
        self.pending_rank
    }

    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    /// Whether the "press space to play again" prompt is lit this frame
    pub fn prompt_visible(&self) -> bool {
        (self.display_frames / 30) % 2 == 0
    }

    fn commit_name(&mut self) {
        let name = if self.name.is_empty() {
            ANONYMOUS_NAME.to_string()
        } else {
            self.name.clone()
        };
        self.last_rank = self.scores.add_score(&name, self.pending_score);
        log::info!(
            "Recorded {} with {} points (rank {:?})",
            name,
            self.pending_score,
            self.last_rank
        );

        if let Some(path) = &self.path {
            match self.scores.save(path) {
                Ok(()) => log::info!("High scores saved ({} entries)", self.scores.entries.len()),
                Err(e) => log::warn!("Could not save high scores: {e}"),
            }
        }

        self.name.clear();
        self.display_frames = 0;
        self.phase = HighScorePhase::ShowingScores;
    }
}

impl HighScoreBoard for HighScoreManager {
    fn is_high_score(&self, score: u64) -> bool {
        self.scores.qualifies(score)
    }

    fn start_name_entry(&mut self, score: u64) {
        self.pending_score = score;
        self.pending_rank = self.scores.potential_rank(score);
        self.name.clear();
        self.last_rank = None;
        self.phase = HighScorePhase::EnteringName;
        log::info!("New high score {score}, rank {:?}", self.pending_rank);
    }

    fn phase(&self) -> HighScorePhase {
        self.phase
    }

    fn update_name_entry(&mut self, input: &NameEntryInput) {
        if self.phase != HighScorePhase::EnteringName {
            return;
        }
        if input.backspace {
            self.name.pop();
        }
        for c in input.typed.iter().copied() {
            if self.name.len() < MAX_NAME_LEN && c.is_ascii_alphanumeric() {
                self.name.push(c.to_ascii_uppercase());
            }
        }
        if input.confirm {
            self.commit_name();
        }
    }

    fn update_showing_scores(&mut self) {
        if self.phase == HighScorePhase::ShowingScores {
            self.display_frames = self.display_frames.wrapping_add(1);
        }
    }

    fn reset(&mut self) {
        self.phase = HighScorePhase::Normal;
        self.display_frames = 0;
    }
}
