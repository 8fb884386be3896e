use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card position")]
    InvalidPosition,
    #[error("A session is already in progress")]
    SessionActive,
    #[error("Board must contain every symbol exactly twice")]
    InvalidBoard,
    #[error("Unknown difficulty")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
