//! Error types for matrix construction and rendering

use std::fmt;
use thiserror::Error;

/// Which header list an id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Coordinate out of range: ({x}, {y})")]
    OutOfRange { x: isize, y: isize },

    #[error("Unknown tag {tag:?} at ({x}, {y})")]
    UnknownTag { x: usize, y: usize, tag: char },

    #[error("Duplicate {axis} header: {id}")]
    DuplicateKey { axis: Axis, id: usize },

    #[error("Export shape {rows}x{cols} exceeds limit of {limit}")]
    ExportTooLarge { rows: usize, cols: usize, limit: usize },

    #[error("Failed to write graph output")]
    Fmt(#[from] fmt::Error),
}

pub type Result<T> = std::result::Result<T, MatrixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = MatrixError::OutOfRange { x: -1, y: 3 };
        assert_eq!(err.to_string(), "Coordinate out of range: (-1, 3)");

        let err = MatrixError::DuplicateKey { axis: Axis::Column, id: 4 };
        assert_eq!(err.to_string(), "Duplicate column header: 4");

        let err = MatrixError::UnknownTag { x: 0, y: 1, tag: 'q' };
        assert_eq!(err.to_string(), "Unknown tag 'q' at (0, 1)");

        let err = MatrixError::ExportTooLarge { rows: 3, cols: 9, limit: 16 };
        assert_eq!(err.to_string(), "Export shape 3x9 exceeds limit of 16");
    }
}
