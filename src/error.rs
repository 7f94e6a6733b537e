use std::fmt;

use crate::grids::Direction;

/// Everything that can go wrong between reading the command line and
/// printing a maze.
#[derive(Debug, Clone, PartialEq)]
pub enum MazeError {
    /// The cell array for a `width x height` grid could not be obtained.
    Allocation { width: usize, height: usize },
    /// A dimension failed validation before any grid was built.
    InvalidArgument { reason: String },
    /// A step from `(x, y)` in `direction` would leave the grid. The generator
    /// treats this as "try another direction", it never reaches the user.
    OutOfBounds {
        x: usize,
        y: usize,
        direction: Direction,
    },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation { width, height } => {
                write!(f, "out of memory allocating a {}x{} maze!", width, height)
            }
            Self::InvalidArgument { reason } => write!(f, "{}", reason),
            Self::OutOfBounds { x, y, direction } => {
                write!(f, "no junction {:?} of ({}, {})", direction, x, y)
            }
        }
    }
}

impl std::error::Error for MazeError {}
