//! Level documents: tuning, player spawn and the obstacle layout.
//!
//! Levels are plain JSON. Vectors are two-element arrays:
//!
//! ```json
//! {
//!   "name": "room",
//!   "tuning": { "gravity": -25.0 },
//!   "player": { "position": [5.0, 1.0], "dimension": [0.5, 0.5] },
//!   "obstacles": [{ "position": [0.0, 0.0], "dimension": [10.0, 0.25] }]
//! }
//! ```

use crate::engine::{Body, Obstacle, PlayerState};
use crate::tuning::Tuning;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating levels and input scripts
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("player dimension must be positive, got ({width}, {height})")]
    InvalidPlayer { width: f64, height: f64 },
    #[error("obstacle {index} dimension must be positive, got ({width}, {height})")]
    InvalidObstacle { index: usize, width: f64, height: f64 },
    #[error("{what} contains a non-finite coordinate")]
    NonFinite { what: String },
    #[error("tuning value '{field}' is out of range: {value}")]
    InvalidTuning { field: &'static str, value: f64 },
    #[error("input script segment {index} has zero frames")]
    EmptySegment { index: usize },
}

/// Where and how large the player starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    pub position: DVec2,
    pub dimension: DVec2,
    #[serde(default)]
    pub velocity: DVec2,
}

/// A complete playable setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tuning: Tuning,
    pub player: Spawn,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

impl Level {
    /// Parse and validate a level from JSON source
    pub fn from_json(source: &str) -> Result<Self, LevelError> {
        let level: Level = serde_json::from_str(source)?;
        level.validate()?;
        tracing::debug!(
            name = %level.name,
            obstacles = level.obstacles.len(),
            "loaded level"
        );
        Ok(level)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&source)
    }

    /// Load `path`, or the built-in demo level when there is none
    pub fn from_file_or_demo(path: Option<&Path>) -> Result<Self, LevelError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::demo()),
        }
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants the physics step relies on
    pub fn validate(&self) -> Result<(), LevelError> {
        self.tuning.validate()?;

        let player = &self.player;
        if !(player.position.is_finite() && player.dimension.is_finite() && player.velocity.is_finite()) {
            return Err(LevelError::NonFinite {
                what: "player".to_string(),
            });
        }
        if player.dimension.x <= 0.0 || player.dimension.y <= 0.0 {
            return Err(LevelError::InvalidPlayer {
                width: player.dimension.x,
                height: player.dimension.y,
            });
        }

        for (index, obstacle) in self.obstacles.iter().enumerate() {
            if !(obstacle.position.is_finite() && obstacle.dimension.is_finite()) {
                return Err(LevelError::NonFinite {
                    what: format!("obstacle {}", index),
                });
            }
            if obstacle.dimension.x <= 0.0 || obstacle.dimension.y <= 0.0 {
                return Err(LevelError::InvalidObstacle {
                    index,
                    width: obstacle.dimension.x,
                    height: obstacle.dimension.y,
                });
            }
        }

        Ok(())
    }

    /// Player state at the start of the level
    pub fn initial_state(&self) -> PlayerState {
        PlayerState::new(
            Body::new(self.player.position, self.player.dimension).with_velocity(self.player.velocity),
        )
    }

    /// A walled room with a floor and three platforms
    pub fn demo() -> Self {
        let obstacle = |x, y, w, h| Obstacle::new(DVec2::new(x, y), DVec2::new(w, h));
        Self {
            name: "demo".to_string(),
            tuning: Tuning::default(),
            player: Spawn {
                position: DVec2::new(5.0, 1.0),
                dimension: DVec2::new(0.5, 0.5),
                velocity: DVec2::ZERO,
            },
            obstacles: vec![
                // floor and side walls
                obstacle(0.0, 0.0, 10.0, 0.25),
                obstacle(0.0, 0.0, 0.25, 10.0),
                obstacle(9.75, 0.0, 0.25, 10.0),
                // platforms
                obstacle(1.0, 2.0, 4.0, 0.4),
                obstacle(6.0, 3.5, 0.4, 0.2),
                obstacle(4.8, 7.0, 0.4, 3.0),
            ],
        }
    }
}
