//! The board engine: move resolution, spawning and terminal detection.
//!
//! `Game` owns a `GameState` and is the only thing that mutates it:
//! - Slides the board and spawns a tile when the slide changed something
//! - Keeps the win and game-over latches
//! - Reports each move as a `MoveOutcome` carrying any `GameEvent`s
//!
//! Presentation layers drive it with `Direction`s or raw tokens and read
//! back snapshots.

pub mod engine;
pub mod event;

pub use engine::{Dispatch, Events, Game, GameStatus, MoveOutcome};
pub use event::GameEvent;
