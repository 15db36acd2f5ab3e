//! Session state: the board plus everything that accumulates across moves.
//!
//! ## GameState
//!
//! Owned by the engine and mutated only through it:
//! - Board, score, move count, highest tile
//! - Win and game-over latches
//! - Config and RNG
//!
//! ## GameSnapshot
//!
//! A plain, serializable copy of the observable fields, handed to the
//! presentation layer for drawing.

use log::trace;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::config::GameConfig;
use super::rng::GameRng;

/// A tile placed by the spawn rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

/// Read-only view of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub score: u64,
    pub won: bool,
    pub game_over: bool,
    pub highest_tile: u32,
    pub moves: u32,
}

/// Full session state.
#[derive(Clone, Debug)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) score: u64,
    pub(crate) won: bool,
    pub(crate) game_over: bool,
    pub(crate) highest_tile: u32,
    pub(crate) moves: u32,
    pub(crate) config: GameConfig,
    pub(crate) rng: GameRng,
}

impl GameState {
    /// State over an existing board. Score and latches start cleared.
    #[must_use]
    pub(crate) fn new(board: Board, config: GameConfig, rng: GameRng) -> Self {
        Self {
            highest_tile: board.max_tile(),
            board,
            score: 0,
            won: false,
            game_over: false,
            moves: 0,
            config,
            rng,
        }
    }

    /// Current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Accumulated score.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Has the win latch flipped?
    #[must_use]
    pub fn won(&self) -> bool {
        self.won
    }

    /// Has the game-over latch flipped?
    #[must_use]
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Largest tile seen this session.
    #[must_use]
    pub fn highest_tile(&self) -> u32 {
        self.highest_tile
    }

    /// Number of moves that changed the board.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Rules in effect.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seed of the session RNG.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Place one tile on a uniformly chosen empty cell.
    ///
    /// The value is 4 with `config.four_probability`, else 2. A full board
    /// is left untouched and consumes no randomness.
    pub(crate) fn spawn_tile(&mut self) -> Option<Spawn> {
        let empties = self.board.empty_cells();
        let &(row, col) = self.rng.choose(&empties)?;
        let value = if self.rng.gen_bool(self.config.four_probability) {
            4
        } else {
            2
        };

        self.board.set(row, col, value);
        self.highest_tile = self.highest_tile.max(value);
        trace!("spawned {} at ({}, {})", value, row, col);

        Some(Spawn { row, col, value })
    }

    /// Copy the observable fields.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board,
            score: self.score,
            won: self.won,
            game_over: self.game_over,
            highest_tile: self.highest_tile,
            moves: self.moves,
        }
    }
}
