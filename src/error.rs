use grid_util::Point;
use thiserror::Error;

/// Errors raised when a maze operation is called with arguments it cannot accept.
/// An unreachable goal is not an error: solvers return an empty path for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("maze size {size} is invalid: it must be odd and at least {min}", min = crate::MIN_MAZE_SIZE)]
    InvalidSize { size: usize },
    #[error("point {point:?} lies outside the {size}x{size} grid")]
    OutOfBounds { point: Point, size: usize },
    #[error("grid is not square: row {row} has width {width}, expected {expected}")]
    NotSquare {
        row: usize,
        width: usize,
        expected: usize,
    },
    #[error("unknown cell character {0:?}")]
    UnknownCell(char),
}
