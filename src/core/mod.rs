//! Core types: board, directions, RNG, configuration, session state.
//!
//! Nothing here knows about latches or events; the rules engine composes
//! these pieces into a playable game.

pub mod board;
pub mod config;
pub mod direction;
pub mod rng;
pub mod state;

pub use board::{
    compact_line, is_tile, reduce_line, Board, BoardError, EmptyCells, Line, Merges, Slide, MAX_TILE,
    SIZE,
};
pub use config::{ConfigError, GameConfig};
pub use direction::{Direction, DirectionError};
pub use rng::GameRng;
pub use state::{GameSnapshot, GameState, Spawn};
