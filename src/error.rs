use thiserror::Error;

use crate::{HEIGHT, WIDTH};

/// Errors reported by the board model and the engine's external interface
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid move, column {0} out of range. Columns must be between 0 and {max}", max = WIDTH - 1)]
    ColumnOutOfRange(usize),
    #[error("invalid move, column {0} full")]
    ColumnFull(usize),
    #[error("invalid cell value {value} at row {row}, column {column}")]
    InvalidCell { row: usize, column: usize, value: u8 },
    #[error("floating disc at row {row}, column {column}, rows run 0 (top) to {bottom} (bottom)", bottom = HEIGHT - 1)]
    FloatingDisc { row: usize, column: usize },
    #[error("invalid player {0}, expected 1 or 2")]
    InvalidPlayer(u8),
    #[error("could not parse '{0}' as a valid move")]
    ParseMove(char),
    #[error("invalid position, game is over")]
    GameOver,
    #[error("search worker stopped before reporting a move")]
    WorkerLost,
}

pub type Result<T> = std::result::Result<T, Error>;
