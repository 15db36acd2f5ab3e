//! Python bindings for the 2048 engine.
//!
//! Lets a Python front end (pygame, tkinter, a notebook) keep its own
//! drawing and key handling while the rules run here.
//!
//! # Quick Start
//!
//! ```python
//! import rust_2048
//!
//! game = rust_2048.Game2048(seed=42)
//! changed = game.move("LEFT")
//! board = game.board()          # 4x4 numpy uint32 array
//! print(game.score, game.won, game.game_over)
//! ```

use pyo3::prelude::*;

mod py_game;

pub use py_game::*;

/// rust_2048: 2048 rules engine.
#[pymodule]
fn rust_2048(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGame>()?;
    Ok(())
}
