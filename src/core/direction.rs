//! Move directions.
//!
//! A direction is the only command the board accepts. Presentation layers
//! translate their own input (arrow keys, swipes, text) into a `Direction`
//! or hand the engine a raw token via `Game::dispatch`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing a direction token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectionError {
    #[error("no such direction '{0}'")]
    Unknown(String),
}

/// One of the four sliding directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions, in dispatch order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Upper-case token name (`"LEFT"`, `"RIGHT"`, ...).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
            Direction::Up => "UP",
            Direction::Down => "DOWN",
        }
    }
}

impl FromStr for Direction {
    type Err = DirectionError;

    /// Parse a case-insensitive full name or its first letter.
    ///
    /// ```
    /// use rust_2048::core::Direction;
    ///
    /// assert_eq!("left".parse(), Ok(Direction::Left));
    /// assert_eq!("D".parse(), Ok(Direction::Down));
    /// assert!("sideways".parse::<Direction>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            _ => Err(DirectionError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_names() {
        assert_eq!("LEFT".parse(), Ok(Direction::Left));
        assert_eq!("Right".parse(), Ok(Direction::Right));
        assert_eq!("up".parse(), Ok(Direction::Up));
        assert_eq!(" down ".parse(), Ok(Direction::Down));
    }

    #[test]
    fn test_parse_letters() {
        assert_eq!("l".parse(), Ok(Direction::Left));
        assert_eq!("R".parse(), Ok(Direction::Right));
        assert_eq!("u".parse(), Ok(Direction::Up));
        assert_eq!("d".parse(), Ok(Direction::Down));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "north".parse::<Direction>().unwrap_err();
        assert_eq!(err, DirectionError::Unknown("north".to_string()));
        assert_eq!(err.to_string(), "no such direction 'north'");

        assert!("".parse::<Direction>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for dir in Direction::ALL {
            let parsed: Direction = dir.to_string().parse().unwrap();
            assert_eq!(parsed, dir);
        }
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Direction::Up).unwrap();
        let deserialized: Direction = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, Direction::Up);
    }
}
