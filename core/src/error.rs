use thiserror::Error;

use crate::Coord2;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Board exceeds the maximum supported extent")]
    BoardTooLarge,
    #[error("Revealed count {count} at {coords:?} is out of range")]
    InvalidClue { coords: Coord2, count: u8 },
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("No move available while the game is still active")]
    NoMoveAvailable,
}

pub type Result<T> = core::result::Result<T, GameError>;
