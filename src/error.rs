//! Error types for the parts of the game that touch the outside world
//!
//! The simulation itself never returns errors across a frame: malformed
//! entities are rejected at construction and simply not spawned.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid spawn parameters for {kind}: {reason}")]
    InvalidSpawn { kind: &'static str, reason: String },
}

impl GameError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_spawn(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSpawn {
            kind,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
