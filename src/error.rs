use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// A full elimination pass reduced no column, so no pass ever will.
    Singular,
    DimensionMismatch { left: usize, right: usize },
    NotSquare { rows: usize, cols: usize },
    Empty,
    OutOfBounds { row: usize, col: usize, size: usize },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::Singular => write!(f, "matrix is singular"),
            MatrixError::DimensionMismatch { left, right } => {
                write!(
                    f,
                    "dimensions not compatible: {}x{} vs {}x{}",
                    left, left, right, right
                )
            }
            MatrixError::NotSquare { rows, cols } => {
                write!(f, "expected a square matrix, got {} rows of {} columns", rows, cols)
            }
            MatrixError::Empty => write!(f, "matrix has no elements"),
            MatrixError::OutOfBounds { row, col, size } => {
                write!(
                    f,
                    "row {} / column {} out of bounds for a matrix of size {}",
                    row, col, size
                )
            }
        }
    }
}

impl Error for MatrixError {}
