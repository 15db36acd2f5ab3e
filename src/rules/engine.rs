//! The board engine.
//!
//! A move runs in a fixed order:
//!
//! 1. Snapshot the board
//! 2. Slide it (see `Board::slide`) and add the merge score
//! 3. If the board changed, spawn one tile
//! 4. Raise milestones, then update the win latch from this move's merges
//! 5. Update the game-over latch
//!
//! Steps 4 and 5 run on every move, including moves that changed nothing.
//! Both latches are one-way.
//!
//! ```
//! use rust_2048::{Direction, Game};
//!
//! let mut game = Game::new_game(42);
//! assert_eq!(game.board().tile_count(), 2);
//!
//! let outcome = game.apply_move(Direction::Left);
//! assert_eq!(outcome.spawned.is_some(), outcome.changed);
//! ```

use log::{debug, info};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{
    Board, ConfigError, Direction, DirectionError, GameConfig, GameRng, GameSnapshot, GameState,
    Spawn,
};

use super::event::GameEvent;

/// Events raised by a single move.
pub type Events = SmallVec<[GameEvent; 4]>;

/// What a single move did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Direction that was applied.
    pub direction: Direction,
    /// Did the slide change the board?
    pub changed: bool,
    /// Score added by this move's merges.
    pub score_gained: u64,
    /// Tile placed after the slide, if any.
    pub spawned: Option<Spawn>,
    /// Milestones and latch transitions, in the order they happened.
    pub events: Events,
}

/// Result of dispatching a raw direction token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The token named a direction and the move was applied.
    Applied(MoveOutcome),
    /// The token named no direction. Nothing was touched.
    NoSuchDirection(String),
}

impl Dispatch {
    /// Did the board change?
    #[must_use]
    pub fn changed(&self) -> bool {
        match self {
            Dispatch::Applied(outcome) => outcome.changed,
            Dispatch::NoSuchDirection(_) => false,
        }
    }

    /// The move outcome, if a move was applied.
    #[must_use]
    pub fn outcome(&self) -> Option<&MoveOutcome> {
        match self {
            Dispatch::Applied(outcome) => Some(outcome),
            Dispatch::NoSuchDirection(_) => None,
        }
    }
}

/// Both latches at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub won: bool,
    pub game_over: bool,
}

/// A 2048 session.
#[derive(Clone, Debug)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// Start a classic game with a fixed seed.
    #[must_use]
    pub fn new_game(seed: u64) -> Self {
        Self::start(GameConfig::default(), GameRng::new(seed))
    }

    /// Start a classic game seeded from the thread RNG.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::start(GameConfig::default(), GameRng::from_entropy())
    }

    /// Start a game with custom rules and an injected RNG.
    pub fn with_config(config: GameConfig, rng: GameRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::start(config, rng))
    }

    /// Resume from a given board without spawning starting tiles.
    ///
    /// Score starts at zero. The win latch is set if the board already holds
    /// the winning tile, and the game-over latch if no move remains.
    pub fn from_board(board: Board, config: GameConfig, rng: GameRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut state = GameState::new(board, config, rng);
        state.won = board.max_tile() >= state.config.win_tile;
        state.game_over = !board.has_valid_moves();
        Ok(Self { state })
    }

    fn start(config: GameConfig, rng: GameRng) -> Self {
        let mut state = GameState::new(Board::empty(), config, rng);
        for _ in 0..state.config.initial_tiles {
            state.spawn_tile();
        }
        debug!("new game, seed {}", state.seed());

        let mut game = Self { state };
        game.update_game_over(&mut Events::new());
        game
    }

    // === Commands ===

    /// Apply a move and report what happened.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        let before = self.state.board;
        let highest_before = self.state.highest_tile;
        let slide = before.slide(direction);
        let changed = slide.board != before;

        self.state.board = slide.board;
        self.state.score += slide.score;

        let spawned = if changed {
            self.state.moves += 1;
            self.state.spawn_tile()
        } else {
            None
        };

        let mut events = Events::new();

        let mut best = highest_before.max(self.state.config.milestone_floor);
        for &merged in &slide.merges {
            if merged > best {
                events.push(GameEvent::Milestone(merged));
                best = merged;
            }
            self.state.highest_tile = self.state.highest_tile.max(merged);
        }

        if !self.state.won && slide.merges.contains(&self.state.config.win_tile) {
            self.state.won = true;
            info!("reached {} after {} moves", self.state.config.win_tile, self.state.moves);
            events.push(GameEvent::Won);
        }

        self.update_game_over(&mut events);

        debug!(
            "{} changed={} score +{} -> {}",
            direction, changed, slide.score, self.state.score
        );

        MoveOutcome {
            direction,
            changed,
            score_gained: slide.score,
            spawned,
            events,
        }
    }

    /// Apply a move; true if the board changed.
    pub fn play(&mut self, direction: Direction) -> bool {
        self.apply_move(direction).changed
    }

    /// Parse `token` as a direction and apply it.
    ///
    /// Unknown tokens are reported, not applied: the board, score and
    /// latches stay exactly as they were.
    pub fn dispatch(&mut self, token: &str) -> Dispatch {
        match token.parse::<Direction>() {
            Ok(direction) => Dispatch::Applied(self.apply_move(direction)),
            Err(DirectionError::Unknown(token)) => {
                debug!("ignoring unknown direction {:?}", token);
                Dispatch::NoSuchDirection(token)
            }
        }
    }

    fn update_game_over(&mut self, events: &mut Events) {
        if !self.state.game_over && !self.state.board.has_valid_moves() {
            self.state.game_over = true;
            info!(
                "game over: score {}, highest tile {}, {} moves",
                self.state.score, self.state.highest_tile, self.state.moves
            );
            events.push(GameEvent::GameOver {
                score: self.state.score,
            });
        }
    }

    // === Queries ===

    /// Copy of the current board.
    #[must_use]
    pub fn board(&self) -> Board {
        self.state.board
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.state.score
    }

    #[must_use]
    pub fn has_won(&self) -> bool {
        self.state.won
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    /// Can any direction still change the board?
    #[must_use]
    pub fn has_valid_moves(&self) -> bool {
        self.state.board.has_valid_moves()
    }

    #[must_use]
    pub fn highest_tile(&self) -> u32 {
        self.state.highest_tile
    }

    /// Number of moves that changed the board.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.state.moves
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        GameStatus {
            won: self.state.won,
            game_over: self.state.game_over,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// Borrow the full session state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_from(rows: [[u32; 4]; 4], seed: u64) -> Game {
        let board = Board::from_rows(rows).unwrap();
        Game::from_board(board, GameConfig::default(), GameRng::new(seed)).unwrap()
    }

    #[test]
    fn test_new_game() {
        let game = Game::new_game(42);

        assert_eq!(game.board().tile_count(), 2);
        assert_eq!(game.score(), 0);
        assert_eq!(game.status(), GameStatus::default());
        assert_eq!(game.moves(), 0);
        assert!(game.board().is_well_formed());
        assert!(game.board().max_tile() <= 4);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = GameConfig::default().with_win_tile(100);
        let err = Game::with_config(config, GameRng::new(1)).unwrap_err();
        assert_eq!(err, ConfigError::WinTile(100));

        // An out-of-range spawn probability never reaches the RNG
        let config = GameConfig::default().with_four_probability(1.5);
        let err = Game::with_config(config, GameRng::new(1)).unwrap_err();
        assert_eq!(err, ConfigError::FourProbability(1.5));

        let board = Board::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let config = GameConfig::default().with_four_probability(-0.1);
        assert!(Game::from_board(board, config, GameRng::new(1)).is_err());
    }

    #[test]
    fn test_with_config_initial_tiles() {
        let config = GameConfig::default().with_initial_tiles(5);
        let game = Game::with_config(config, GameRng::new(1)).unwrap();
        assert_eq!(game.board().tile_count(), 5);
    }

    #[test]
    fn test_merge_then_spawn() {
        let mut game = game_from([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 7);

        let outcome = game.apply_move(Direction::Left);

        assert!(outcome.changed);
        assert_eq!(outcome.score_gained, 4);
        assert_eq!(game.board().get(0, 0), 4);
        assert_eq!(game.score(), 4);
        assert_eq!(game.board().tile_count(), 2);
        assert_eq!(game.moves(), 1);

        let spawn = outcome.spawned.unwrap();
        assert_ne!((spawn.row, spawn.col), (0, 0));
        assert!(spawn.value == 2 || spawn.value == 4);
    }

    #[test]
    fn test_unchanged_move_spawns_nothing() {
        let mut game = game_from([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]], 7);
        let before = game.board();

        let outcome = game.apply_move(Direction::Left);

        assert!(!outcome.changed);
        assert!(outcome.spawned.is_none());
        assert!(outcome.events.is_empty());
        assert_eq!(game.board(), before);
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn test_milestones() {
        let mut game = game_from([[8, 8, 0, 0], [0; 4], [0; 4], [0; 4]], 1);
        let outcome = game.apply_move(Direction::Left);
        assert_eq!(outcome.events.as_slice(), &[GameEvent::Milestone(16)]);
        assert_eq!(game.highest_tile(), 16);

        // 8 does not exceed the default floor
        let mut game = game_from([[4, 4, 0, 0], [0; 4], [0; 4], [0; 4]], 1);
        let outcome = game.apply_move(Direction::Left);
        assert!(outcome.events.is_empty());
    }

    #[test]
    fn test_milestone_only_for_new_highest() {
        let mut game = game_from([[16, 16, 0, 0], [64, 0, 0, 0], [0; 4], [0; 4]], 1);
        let outcome = game.apply_move(Direction::Left);
        assert!(outcome.events.is_empty());
        assert_eq!(game.highest_tile(), 64);
    }

    #[test]
    fn test_win_latch() {
        let mut game = game_from([[1024, 1024, 0, 0], [1024, 1024, 0, 0], [0; 4], [0; 4]], 3);
        assert!(!game.has_won());

        let outcome = game.apply_move(Direction::Left);
        assert!(game.has_won());
        assert!(outcome.events.contains(&GameEvent::Won));
        assert!(outcome.events.contains(&GameEvent::Milestone(2048)));

        // Merge the two 2048s; the latch must hold
        let outcome = game.apply_move(Direction::Up);
        assert_eq!(game.board().get(0, 0), 4096);
        assert!(!game.board().contains(2048));
        assert!(game.has_won());
        assert!(!outcome.events.contains(&GameEvent::Won));
    }

    #[test]
    fn test_win_does_not_block_play() {
        let mut game = game_from([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]], 3);
        game.play(Direction::Left);
        assert!(game.has_won());
        assert!(!game.is_game_over());
        assert!(game.play(Direction::Right));
    }

    #[test]
    fn test_dead_board() {
        let mut game = game_from([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]], 1);
        assert!(!game.has_valid_moves());
        assert!(game.is_game_over());

        for direction in Direction::ALL {
            let outcome = game.apply_move(direction);
            assert!(!outcome.changed);
            assert!(outcome.events.is_empty());
        }
        assert!(game.is_game_over());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_move_into_game_over() {
        let mut game = game_from(
            [[2, 4, 2, 4], [4, 2, 4, 2], [64, 4, 2, 4], [8, 16, 32, 0]],
            11,
        );
        assert!(!game.is_game_over());

        let outcome = game.apply_move(Direction::Right);

        assert!(outcome.changed);
        let spawn = outcome.spawned.unwrap();
        assert_eq!((spawn.row, spawn.col), (3, 0));
        assert!(game.is_game_over());
        assert!(!game.has_valid_moves());
        assert_eq!(outcome.events.as_slice(), &[GameEvent::GameOver { score: 0 }]);
    }

    #[test]
    fn test_dispatch() {
        let mut game = game_from([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 5);

        let result = game.dispatch("sideways");
        assert_eq!(result, Dispatch::NoSuchDirection("sideways".to_string()));
        assert!(!result.changed());
        assert!(result.outcome().is_none());
        assert_eq!(game.board().get(0, 1), 2);
        assert_eq!(game.score(), 0);

        let result = game.dispatch("LEFT");
        assert!(result.changed());
        assert_eq!(result.outcome().unwrap().direction, Direction::Left);
        assert_eq!(game.score(), 4);
    }

    #[test]
    fn test_deterministic_replay() {
        let mut game1 = Game::new_game(12345);
        let mut game2 = Game::new_game(12345);

        for i in 0..200 {
            let direction = Direction::ALL[i % 4];
            assert_eq!(game1.apply_move(direction), game2.apply_move(direction));
        }
        assert_eq!(game1.snapshot(), game2.snapshot());
    }
}
