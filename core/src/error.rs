use thiserror::Error;

use crate::Tile;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid direction")]
    InvalidDirection,
    #[error("Board shape is not a square grid")]
    InvalidBoardShape,
    #[error("Invalid tile value {0}, expected zero or a power of two")]
    InvalidTileValue(Tile),
    #[error("Grid must be at least 2x2")]
    GridTooSmall,
}

pub type Result<T> = core::result::Result<T, GameError>;
