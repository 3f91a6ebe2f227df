//! Backtracking solver over piece orientations.
//!
//! Cells are decided one at a time in row-major order. Each cell tries the
//! distinct orientations of its shape, starting from its current one:
//! - empty cells and crosses have a single candidate
//! - segments have two, since they are symmetric under a half turn
//! - endpoints, corners and tees have four
//!
//! A candidate is dropped as soon as it mismatches an edge whose other side is
//! already decided, or puts a connector against the border of a non-wrapping
//! grid. Complete assignments are accepted only if the grid is won, so the
//! pruning never hides a solution.
//!
//! The search recurses once per cell; its depth is the number of cells.

use tracing::debug;

use crate::geometry::EdgeStatus;
use crate::grid::Grid;
use crate::pieces::Direction;

/// Search state shared by solving and counting.
struct Search<'a> {
    grid: &'a mut Grid,
    /// Stop at the first solution and leave it in the grid.
    stop_at_first: bool,
    solutions: usize,
    nodes: u64,
}

impl<'a> Search<'a> {
    fn new(grid: &'a mut Grid, stop_at_first: bool) -> Self {
        Self {
            grid,
            stop_at_first,
            solutions: 0,
            nodes: 0,
        }
    }

    /// Explores every assignment of the cells from `cell_index` on.
    ///
    /// Returns true when the search must stop. Every cell whose subtree is
    /// exhausted gets its original piece back.
    fn explore(&mut self, cell_index: usize) -> bool {
        self.nodes += 1;

        if cell_index == self.grid.cell_count() {
            if self.grid.is_won() {
                self.solutions += 1;
                return self.stop_at_first;
            }
            return false;
        }

        let original = self.grid.piece_at(cell_index);
        for quarter_turns in 0..original.shape.candidate_count() {
            self.grid
                .set_piece_at(cell_index, original.rotated(quarter_turns as i32));
            if !self.fits_decided_neighbors(cell_index) {
                continue;
            }
            if self.explore(cell_index + 1) {
                return true;
            }
        }

        self.grid.set_piece_at(cell_index, original);
        false
    }

    /// Checks the edges of `cell_index` that no later choice can change.
    ///
    /// A neighbor is decided when its index is not greater than the current
    /// one; this includes the cell itself on one-row or one-column wrapping
    /// grids, and wrap-around neighbors at the start of the grid.
    fn fits_decided_neighbors(&self, cell_index: usize) -> bool {
        Direction::ALL.iter().all(|&dir| {
            let decided = match self.grid.neighbor_idx(cell_index, dir) {
                Some(next) => next <= cell_index,
                None => true,
            };
            !decided || self.grid.check_edge_at(cell_index, dir) != EdgeStatus::Mismatch
        })
    }
}

/// Searches for a solution and leaves it in `grid`.
///
/// Returns false, with every orientation restored, if the puzzle has no
/// solution. The move history is not touched.
pub fn solve(grid: &mut Grid) -> bool {
    let mut search = Search::new(grid, true);
    let solved = search.explore(0);
    debug!(solved, nodes = search.nodes, "solver finished");
    solved
}

/// Counts the orientation assignments that solve `grid`.
///
/// Orientations giving the same connectors (both halves of a segment, any
/// turn of a cross) count once. The grid is left unchanged.
pub fn count_solutions(grid: &mut Grid) -> usize {
    let mut search = Search::new(grid, false);
    search.explore(0);
    debug!(
        solutions = search.solutions,
        nodes = search.nodes,
        "solution count finished"
    );
    search.solutions
}
