//! Game bindings for Python.

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::prelude::*;

use crate::core::{GameConfig, GameRng, SIZE};
use crate::rules::Game;

/// Python wrapper for Game.
///
/// Holds one session. Unknown direction strings are ignored and reported
/// as "no change", matching `Game::dispatch`.
#[pyclass(name = "Game2048")]
pub struct PyGame {
    game: Game,
}

#[pymethods]
impl PyGame {
    /// Start a new game.
    ///
    /// # Arguments
    /// - seed: RNG seed; None draws one from the OS-seeded thread RNG
    /// - four_probability: Chance a spawned tile is a 4
    /// - win_tile: Tile value that counts as a win
    #[new]
    #[pyo3(signature = (seed = None, four_probability = 0.1, win_tile = 2048))]
    fn new(seed: Option<u64>, four_probability: f64, win_tile: u32) -> PyResult<Self> {
        let rng = seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let config = GameConfig::default()
            .with_four_probability(four_probability)
            .with_win_tile(win_tile);
        let game = Game::with_config(config, rng)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", e)))?;
        Ok(Self { game })
    }

    /// Apply a move ("LEFT", "RIGHT", "UP", "DOWN").
    ///
    /// Returns True if the board changed.
    #[pyo3(name = "move")]
    fn apply(&mut self, direction: &str) -> bool {
        self.game.dispatch(direction).changed()
    }

    /// Get the board as a 4x4 numpy array.
    fn board<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<u32>>> {
        let flat: Vec<u32> = self.game.board().rows().iter().flatten().copied().collect();
        PyArray1::from_vec_bound(py, flat)
            .reshape([SIZE, SIZE])
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", e)))
    }

    /// Check if any move can still change the board.
    fn has_valid_moves(&self) -> bool {
        self.game.has_valid_moves()
    }

    #[getter]
    fn score(&self) -> u64 {
        self.game.score()
    }

    #[getter]
    fn won(&self) -> bool {
        self.game.has_won()
    }

    #[getter]
    fn game_over(&self) -> bool {
        self.game.is_game_over()
    }

    #[getter]
    fn highest_tile(&self) -> u32 {
        self.game.highest_tile()
    }

    #[getter]
    fn moves(&self) -> u32 {
        self.game.moves()
    }

    /// Seed of this session, for replaying it.
    #[getter]
    fn seed(&self) -> u64 {
        self.game.state().seed()
    }

    fn __repr__(&self) -> String {
        let status = if self.game.is_game_over() {
            "over"
        } else if self.game.has_won() {
            "won"
        } else {
            "ongoing"
        };
        format!(
            "Game2048(score={}, highest={}, moves={}, status={})",
            self.game.score(),
            self.game.highest_tile(),
            self.game.moves(),
            status
        )
    }

    fn __str__(&self) -> String {
        self.game.board().to_string()
    }
}
