//! Game configuration.
//!
//! The defaults are the classic rules: two starting tiles, spawns are a 4
//! one time in ten, and reaching 2048 wins. Presentation layers may tweak
//! them for practice modes; the engine validates a config before using it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::board::{is_tile, SIZE};

/// Errors produced by `GameConfig::validate`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("four_probability must be within [0, 1], got {0}")]
    FourProbability(f64),

    #[error("win_tile must be a power of two >= 4, got {0}")]
    WinTile(u32),

    #[error("initial_tiles must be at most {max}, got {got}")]
    InitialTiles { got: usize, max: usize },
}

/// Rules for a game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Chance that a spawned tile is a 4 instead of a 2 (default: 0.1).
    pub four_probability: f64,

    /// Tile value that flips the win latch (default: 2048).
    pub win_tile: u32,

    /// Tiles spawned on a new board (default: 2).
    pub initial_tiles: usize,

    /// Milestone events fire for new highest tiles strictly above this
    /// value (default: 8).
    pub milestone_floor: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            four_probability: 0.1,
            win_tile: 2048,
            initial_tiles: 2,
            milestone_floor: 8,
        }
    }
}

impl GameConfig {
    /// Set the chance of spawning a 4.
    #[must_use]
    pub fn with_four_probability(mut self, p: f64) -> Self {
        self.four_probability = p;
        self
    }

    /// Set the winning tile.
    #[must_use]
    pub fn with_win_tile(mut self, tile: u32) -> Self {
        self.win_tile = tile;
        self
    }

    /// Set the number of starting tiles.
    #[must_use]
    pub fn with_initial_tiles(mut self, count: usize) -> Self {
        self.initial_tiles = count;
        self
    }

    /// Set the milestone floor.
    #[must_use]
    pub fn with_milestone_floor(mut self, floor: u32) -> Self {
        self.milestone_floor = floor;
        self
    }

    /// Check that every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::FourProbability(self.four_probability));
        }
        if !is_tile(self.win_tile) || self.win_tile < 4 {
            return Err(ConfigError::WinTile(self.win_tile));
        }
        if self.initial_tiles > SIZE * SIZE {
            return Err(ConfigError::InitialTiles {
                got: self.initial_tiles,
                max: SIZE * SIZE,
            });
        }
        Ok(())
    }
}
