//! The 4x4 tile grid and the slide/merge reduction.
//!
//! Every direction is resolved by a single left-moving line reduction:
//!
//! 1. **compact**: slide non-zero tiles toward index 0, keeping order
//! 2. **merge**: scan left to right, doubling the first of each equal pair
//!    and clearing the second, so a tile merges at most once per move
//! 3. **compact** again to close the gaps merges leave behind
//!
//! RIGHT, UP and DOWN conjugate that reduction with a row mirror and/or a
//! transpose instead of carrying their own copies of the algorithm.
//!
//! ```
//! use rust_2048::core::{Board, Direction};
//!
//! let board = Board::from_rows([
//!     [2, 2, 2, 0],
//!     [0, 0, 0, 0],
//!     [0, 0, 0, 0],
//!     [0, 0, 0, 0],
//! ]).unwrap();
//!
//! let slide = board.slide(Direction::Left);
//! assert_eq!(slide.board.rows()[0], [4, 2, 0, 0]);
//! assert_eq!(slide.score, 4);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use super::direction::Direction;

/// Side length of the board.
pub const SIZE: usize = 4;

/// One row or column, read in the direction tiles move toward index 0.
pub type Line = [u32; SIZE];

/// Coordinates `(row, col)` of empty cells, in row-major order.
pub type EmptyCells = SmallVec<[(usize, usize); SIZE * SIZE]>;

/// Values produced by merges during one slide.
pub type Merges = SmallVec<[u32; SIZE * 2]>;

/// Largest tile a 4x4 board can ever hold (2^17).
///
/// A grid of tiles no larger than this sums to at most 2^21, so no sequence
/// of merges can overflow a `u32` cell.
pub const MAX_TILE: u32 = 1 << 17;

/// Errors produced when building a board from raw values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("cell ({row}, {col}) holds {value}, expected 0 or a power of two >= 2")]
    NotPowerOfTwo { row: usize, col: usize, value: u32 },
    #[error("cell ({row}, {col}) holds {value}, larger than the maximum tile {}", MAX_TILE)]
    TileTooLarge { row: usize, col: usize, value: u32 },
}

/// Is `value` a legal non-empty tile?
#[must_use]
pub fn is_tile(value: u32) -> bool {
    value >= 2 && value.is_power_of_two()
}

/// Slide all non-zero values toward index 0, padding with zeros.
#[must_use]
pub fn compact_line(line: Line) -> Line {
    let mut out = [0; SIZE];
    for (slot, value) in out.iter_mut().zip(line.into_iter().filter(|&v| v != 0)) {
        *slot = value;
    }
    out
}

/// Merge equal neighbours in place, left to right.
///
/// Clearing `j + 1` after a merge means the next comparison sees a zero,
/// which is what stops a tile from taking part in two merges.
fn merge_line(line: &mut Line, merges: &mut Merges) -> u64 {
    let mut score = 0;
    for j in 0..SIZE - 1 {
        if line[j] != 0 && line[j] == line[j + 1] {
            line[j] *= 2;
            line[j + 1] = 0;
            score += u64::from(line[j]);
            merges.push(line[j]);
        }
    }
    score
}

fn reduce_line_into(line: Line, merges: &mut Merges) -> (Line, u64) {
    let mut line = compact_line(line);
    let score = merge_line(&mut line, merges);
    (compact_line(line), score)
}

/// Reduce one line to the left: compact, merge, compact.
///
/// Returns the new line and the score gained by its merges.
#[must_use]
pub fn reduce_line(line: Line) -> (Line, u64) {
    let mut merges = Merges::new();
    reduce_line_into(line, &mut merges)
}

/// Result of sliding a board, before any tile is spawned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slide {
    /// Board after the slide.
    pub board: Board,
    /// Sum of the values produced by merges.
    pub score: u64,
    /// Every merged value, one entry per merge.
    pub merges: Merges,
}

impl Slide {
    fn map_board(mut self, f: impl FnOnce(Board) -> Board) -> Self {
        self.board = f(self.board);
        self
    }
}

/// A 4x4 grid of tiles, indexed `(row, col)`. Zero means empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[[u32; SIZE]; SIZE]", into = "[[u32; SIZE]; SIZE]")]
pub struct Board([[u32; SIZE]; SIZE]);

impl TryFrom<[[u32; SIZE]; SIZE]> for Board {
    type Error = BoardError;

    fn try_from(rows: [[u32; SIZE]; SIZE]) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Board> for [[u32; SIZE]; SIZE] {
    fn from(board: Board) -> Self {
        board.0
    }
}

impl Board {
    /// An all-empty board.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a board from rows, rejecting values that are not tiles or that
    /// exceed [`MAX_TILE`].
    pub fn from_rows(rows: [[u32; SIZE]; SIZE]) -> Result<Self, BoardError> {
        for (row, cells) in rows.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if value != 0 && !is_tile(value) {
                    return Err(BoardError::NotPowerOfTwo { row, col, value });
                }
                if value > MAX_TILE {
                    return Err(BoardError::TileTooLarge { row, col, value });
                }
            }
        }
        Ok(Self(rows))
    }

    /// Borrow the rows.
    #[must_use]
    pub fn rows(&self) -> &[[u32; SIZE]; SIZE] {
        &self.0
    }

    /// Copy of the raw matrix.
    #[must_use]
    pub fn to_rows(&self) -> [[u32; SIZE]; SIZE] {
        self.0
    }

    /// Value at `(row, col)`.
    ///
    /// # Panics
    /// If either index is `>= SIZE`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.0[row][col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: u32) {
        debug_assert!(value == 0 || is_tile(value));
        self.0[row][col] = value;
    }

    // === Transforms ===

    /// Mirror every row (column `j` becomes `SIZE - 1 - j`).
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut rows = self.0;
        for row in &mut rows {
            row.reverse();
        }
        Self(rows)
    }

    /// Swap rows and columns.
    #[must_use]
    pub fn transposed(&self) -> Self {
        let mut rows = [[0; SIZE]; SIZE];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.0[j][i];
            }
        }
        Self(rows)
    }

    // === Sliding ===

    fn reduce_left(&self) -> Slide {
        let mut rows = self.0;
        let mut score = 0;
        let mut merges = Merges::new();
        for row in &mut rows {
            let (reduced, gained) = reduce_line_into(*row, &mut merges);
            *row = reduced;
            score += gained;
        }
        Slide {
            board: Self(rows),
            score,
            merges,
        }
    }

    /// Slide every line toward `direction`. Pure; spawns nothing.
    #[must_use]
    pub fn slide(&self, direction: Direction) -> Slide {
        match direction {
            Direction::Left => self.reduce_left(),
            Direction::Right => self.reversed().reduce_left().map_board(|b| b.reversed()),
            Direction::Up => self.transposed().reduce_left().map_board(|b| b.transposed()),
            Direction::Down => self
                .transposed()
                .reversed()
                .reduce_left()
                .map_board(|b| b.reversed().transposed()),
        }
    }

    // === Queries ===

    /// Empty cells in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> EmptyCells {
        let mut cells = EmptyCells::new();
        for (row, values) in self.0.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if value == 0 {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    /// Can any direction still change the board?
    ///
    /// True when a cell is empty or some tile equals its right or bottom
    /// neighbour. This static check is equivalent to trying all four slides.
    #[must_use]
    pub fn has_valid_moves(&self) -> bool {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let value = self.0[row][col];
                if value == 0 {
                    return true;
                }
                if col + 1 < SIZE && value == self.0[row][col + 1] {
                    return true;
                }
                if row + 1 < SIZE && value == self.0[row + 1][col] {
                    return true;
                }
            }
        }
        false
    }

    /// Largest tile on the board (0 if empty).
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.cells().max().unwrap_or(0)
    }

    /// Sum of all tile values.
    #[must_use]
    pub fn tile_sum(&self) -> u64 {
        self.cells().map(u64::from).sum()
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells().filter(|&v| v != 0).count()
    }

    /// Does any cell hold exactly `value`?
    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        self.cells().any(|v| v == value)
    }

    /// Every cell is empty or a power of two >= 2.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.cells().all(|v| v == 0 || is_tile(v))
    }

    fn cells(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().flatten().copied()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                if *value == 0 {
                    write!(f, "{:>5}", ".")?;
                } else {
                    write!(f, "{:>5}", value)?;
                }
            }
        }
        Ok(())
    }
}
