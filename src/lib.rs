//! Pipes Puzzle Library
//!
//! Core of a rotational pipes puzzle: a grid of pieces carrying connectors on
//! their sides, which the player rotates until every connector meets another
//! one and all pieces form a single network. Includes random generation,
//! a backtracking solver, undo/redo and a plain-text save format.

pub mod error;
pub mod generator;
pub mod geometry;
pub mod grid;
pub mod history;
pub mod persistence;
pub mod pieces;
pub mod solver;
pub mod validity;

use std::path::Path;

pub use error::{FormatError, GenerateError, GridError, Infeasibility, PersistenceError};
pub use generator::GeneratorConfig;
pub use geometry::EdgeStatus;
pub use grid::Grid;
pub use history::{History, Move};
pub use pieces::{Direction, Piece, Shape};

/// Whole-puzzle operations on a grid.
///
/// Gathers what the solver and persistence modules offer behind method calls,
/// so a front end can drive a puzzle without importing each module.
pub trait PuzzleOps {
    /// Leaves a solution in the grid; returns false if there is none.
    fn solve(&mut self) -> bool;
    /// Number of solutions, leaving the grid unchanged.
    fn count_solutions(&mut self) -> usize;
    /// Glyph rendering for terminals.
    fn format(&self) -> String;
    /// Serialization in the save format.
    fn to_text(&self) -> String;
    fn save(&self, path: &Path) -> Result<(), PersistenceError>;
}

impl PuzzleOps for Grid {
    fn solve(&mut self) -> bool {
        solver::solve(self)
    }

    fn count_solutions(&mut self) -> usize {
        solver::count_solutions(self)
    }

    fn format(&self) -> String {
        grid::format_grid(self)
    }

    fn to_text(&self) -> String {
        persistence::to_text(self)
    }

    fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        persistence::save(self, path)
    }
}
