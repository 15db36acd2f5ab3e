//! Events raised by a move.
//!
//! The engine reports what happened; deciding how long to show a banner or
//! whether to show it at all belongs to the presentation layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Something noteworthy that happened during one move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A merge produced a new highest tile above the milestone floor.
    Milestone(u32),
    /// The win latch flipped.
    Won,
    /// The game-over latch flipped.
    GameOver { score: u64 },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Milestone(tile) => write!(f, "Achievement! You've reached {}!", tile),
            GameEvent::Won => f.write_str("Congratulations! You've won!"),
            GameEvent::GameOver { score } => write!(f, "Game Over! Final Score: {}", score),
        }
    }
}
