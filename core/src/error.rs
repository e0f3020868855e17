use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Too many mines to leave a safe starting zone")]
    TooManyMines,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one row and one column")]
    InvalidBoardShape,
}

pub type Result<T> = std::result::Result<T, GameError>;
