use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("no free cell left on the board to place food")]
    BoardFull,
}
