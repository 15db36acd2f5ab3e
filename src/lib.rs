//! # rust-2048
//!
//! The rules of 2048 as a small, deterministic library.
//!
//! ## Design Principles
//!
//! 1. **One reduction**: every direction is the left-moving
//!    compact/merge/compact pass conjugated by a mirror and/or transpose.
//!
//! 2. **Injectable randomness**: tile spawns draw from a seeded `GameRng`,
//!    so the same seed and moves replay the same game.
//!
//! 3. **No presentation**: rendering, input mapping and message timing live
//!    in whatever drives the engine. The engine only reports `GameEvent`s.
//!
//! ## Modules
//!
//! - `core`: Board, directions, RNG, configuration, session state
//! - `rules`: The `Game` engine, move outcomes and events
//! - `python`: PyO3 bindings (feature `python`)
//!
//! ## Example
//!
//! ```
//! use rust_2048::{Board, Direction, Game, GameConfig, GameRng};
//!
//! let board = Board::from_rows([
//!     [2, 2, 0, 0],
//!     [0, 0, 0, 0],
//!     [0, 0, 0, 0],
//!     [0, 0, 0, 0],
//! ]).unwrap();
//! let mut game = Game::from_board(board, GameConfig::default(), GameRng::new(7)).unwrap();
//!
//! assert!(game.play(Direction::Left));
//! assert_eq!(game.board().get(0, 0), 4);
//! assert_eq!(game.score(), 4);
//! ```

pub mod core;
pub mod rules;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Board, BoardError, ConfigError, Direction, DirectionError, GameConfig, GameRng, GameSnapshot,
    GameState, Slide, Spawn, MAX_TILE, SIZE,
};

pub use crate::rules::{Dispatch, Game, GameEvent, GameStatus, MoveOutcome};
