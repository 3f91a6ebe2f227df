//! Error types for grid construction, generation and the text format.
//!
//! Out-of-range indices on an existing grid are programmer errors and panic
//! instead; these enums cover input coming from outside the crate.

use thiserror::Error;

/// Invalid input when building a grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("a {rows}x{cols} grid has more cells than can be addressed")]
    TooLarge { rows: usize, cols: usize },
    #[error("expected {expected} {what}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("invalid shape code {0}")]
    InvalidShape(u8),
    #[error("invalid direction code {0}")]
    InvalidDirection(u8),
}

/// Why a set of generator parameters can never produce a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Infeasibility {
    #[error("{nb_empty} empty cells requested but the grid only has {cells}")]
    TooManyEmpty { nb_empty: usize, cells: usize },
    #[error("a single non-empty piece can never be connected")]
    SinglePiece,
    #[error("{nb_extra} extra edges requested, at most {max} allowed")]
    TooManyExtra { nb_extra: usize, max: usize },
    #[error("only {added} of {requested} extra edges fit in the grid")]
    NoRoomForExtra { added: usize, requested: usize },
}

/// Errors returned by the puzzle generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("infeasible configuration: {0}")]
    Infeasible(#[from] Infeasibility),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// A malformed grid in the text format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unexpected end of input, expected {0}")]
    MissingValue(&'static str),
    #[error("invalid {what} `{token}`")]
    InvalidNumber { what: &'static str, token: String },
    #[error("wrapping flag must be 0 or 1, got `{0}`")]
    InvalidWrapping(String),
    #[error("cell ({row}, {col}): token `{token}` is not a shape and a direction")]
    InvalidToken {
        row: usize,
        col: usize,
        token: String,
    },
    #[error("cell ({row}, {col}): unknown shape `{code}`")]
    UnknownShape { row: usize, col: usize, code: char },
    #[error("cell ({row}, {col}): unknown direction `{code}`")]
    UnknownDirection { row: usize, col: usize, code: char },
    #[error("unexpected data after the last cell: `{0}`")]
    TrailingData(String),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Errors from reading or writing a grid file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Format(#[from] FormatError),
}
