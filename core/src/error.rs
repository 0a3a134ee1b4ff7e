use crate::Coord;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Maze size {0} is out of range")]
    SizeOutOfRange(Coord),
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Grid violates the maze invariants")]
    InvalidGrid,
    #[error("Exit not reachable from the start cell")]
    ExitUnreachable,
}

pub type Result<T> = core::result::Result<T, GameError>;
