//! Error types for maze loading and episode configuration

use thiserror::Error;

use crate::maze::Pos;

/// Errors raised while building a [`Maze`](crate::maze::Maze) from a layout
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum MazeError {
    #[error("maze layout is empty")]
    Empty,

    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid cell character '{character}' at row {row}, column {col}")]
    InvalidCell { character: char, row: usize, col: usize },

    #[error("invalid cell value {value} at row {row}, column {col} (expected 0 or 1)")]
    InvalidBit { value: u8, row: usize, col: usize },
}

/// Errors raised when an episode configuration is rejected at construction
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{which} position {pos:?} is outside the {rows}x{cols} maze")]
    OutOfBounds {
        which: &'static str,
        pos: Pos,
        rows: usize,
        cols: usize,
    },

    #[error("{which} position {pos:?} is a wall")]
    OnWall { which: &'static str, pos: Pos },

    #[error("invalid value {value} for `{name}`, must be in the interval {interval}")]
    OutOfInterval {
        name: &'static str,
        value: f32,
        interval: &'static str,
    },

    #[error(transparent)]
    Maze(#[from] MazeError),
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
