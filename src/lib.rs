//! A computer opponent for the board game 'Connect 4'
//!
//! The engine picks a column within a fixed time budget. Forced tactics
//! (immediate wins, single open threats, a known opening trap) are answered
//! directly, everything else goes through an iterative-deepening minimax
//! search with alpha-beta pruning and a per-game transposition table.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_ai::{Board, Engine, Player, SearchConfig};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // player one has stacked three discs in the first column
//! let board = Board::from_moves("12131")?;
//! let mut engine = Engine::new(SearchConfig::default().with_max_depth(4));
//! let selection = engine.select_move(&board, Player::Two);
//!
//! assert_eq!(selection.column(), Some(0));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;

pub mod board;

pub mod config;

pub mod engine;

pub mod error;

pub mod evaluation;

pub mod search;

pub mod threats;

pub mod transposition_table;

pub mod zobrist;

mod test;

pub use board::{Board, Cell, Direction, Line, Player, Position, WinLine, LINES};
pub use config::{EvalWeights, SearchConfig};
pub use engine::{Engine, MoveChoice, PendingMove, Progress, Reason, Selection};
pub use error::{Error, Result};
pub use search::{IterativeDeepening, SearchResult, WIN_SCORE};

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned discs needed to win
pub const CONNECT: usize = 4;

/// The number of distinct 4-cell lines on the board
pub const LINE_COUNT: usize = HEIGHT * (WIDTH - CONNECT + 1)
    + WIDTH * (HEIGHT - CONNECT + 1)
    + 2 * (HEIGHT - CONNECT + 1) * (WIDTH - CONNECT + 1);

// the evaluation weights and move ordering assume the standard board
const_assert_eq!(WIDTH, 7);
const_assert_eq!(HEIGHT, 6);
const_assert_eq!(LINE_COUNT, 69);
