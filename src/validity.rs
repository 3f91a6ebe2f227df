//! Win condition: every connector is paired and all pieces form one network.

use crate::geometry::EdgeStatus;
use crate::grid::Grid;
use crate::pieces::{Direction, Shape};

impl Grid {
    /// Returns true if no connector in the grid is left unmatched.
    pub fn is_well_paired(&self) -> bool {
        (0..self.cell_count()).all(|idx| {
            let piece = self.piece_at(idx);
            Direction::ALL.iter().all(|&dir| {
                !piece.has_connector(dir) || self.check_edge_at(idx, dir) == EdgeStatus::Match
            })
        })
    }

    /// Returns true if every non-empty piece is reachable from every other
    /// one through matched edges.
    ///
    /// A grid without any piece is trivially connected.
    pub fn is_connected(&self) -> bool {
        let Some(start) = (0..self.cell_count()).find(|&idx| self.piece_at(idx).shape != Shape::Empty)
        else {
            return true;
        };
        let piece_count = self
            .pieces()
            .iter()
            .filter(|piece| piece.shape != Shape::Empty)
            .count();

        // depth-first walk over matched edges, counting the pieces reached
        let mut visited = vec![false; self.cell_count()];
        let mut stack = vec![start];
        visited[start] = true;
        let mut reached = 0;

        while let Some(idx) = stack.pop() {
            reached += 1;
            for dir in Direction::ALL {
                if self.check_edge_at(idx, dir) != EdgeStatus::Match {
                    continue;
                }
                if let Some(next) = self.neighbor_idx(idx, dir) {
                    if !visited[next] {
                        visited[next] = true;
                        stack.push(next);
                    }
                }
            }
        }

        reached == piece_count
    }

    /// Returns true if the puzzle is solved.
    pub fn is_won(&self) -> bool {
        self.is_well_paired() && self.is_connected()
    }
}
