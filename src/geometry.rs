//! Adjacency between cells and edge matching.
//!
//! A cell's neighbor in a direction is the adjacent cell, or nothing at the
//! border of a non-wrapping grid. On a wrapping grid the opposite border is
//! adjacent, which on a single row or column can make a cell its own neighbor.

use crate::grid::Grid;
use crate::pieces::Direction;

/// Relationship between a connector and the facing side of the next cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeStatus {
    /// Neither side has a connector.
    NoEdge,
    /// Both sides have a connector.
    Match,
    /// Exactly one side has a connector, or a connector faces the border.
    Mismatch,
}

impl Grid {
    /// Returns the cell adjacent to (row, col) in `direction`, if any.
    ///
    /// # Panics
    ///
    /// Panics if (row, col) is outside the grid.
    pub fn neighbor(&self, row: usize, col: usize, direction: Direction) -> Option<(usize, usize)> {
        let idx = self.coord_to_idx(row, col);
        self.neighbor_idx(idx, direction)
            .map(|next| self.idx_to_coord(next))
    }

    /// Returns true if the piece at (row, col) has a connector towards `direction`.
    pub fn has_half_edge(&self, row: usize, col: usize, direction: Direction) -> bool {
        self.piece(row, col).has_connector(direction)
    }

    /// Classifies the edge on the `direction` side of (row, col).
    pub fn check_edge(&self, row: usize, col: usize, direction: Direction) -> EdgeStatus {
        let idx = self.coord_to_idx(row, col);
        self.check_edge_at(idx, direction)
    }

    pub(crate) fn neighbor_idx(&self, cell_index: usize, direction: Direction) -> Option<usize> {
        let (row, col) = self.idx_to_coord(cell_index);
        let (rows, cols) = (self.rows(), self.cols());
        let wrapping = self.is_wrapping();

        let (next_row, next_col) = match direction {
            Direction::North if row > 0 => (row - 1, col),
            Direction::North if wrapping => (rows - 1, col),
            Direction::East if col + 1 < cols => (row, col + 1),
            Direction::East if wrapping => (row, 0),
            Direction::South if row + 1 < rows => (row + 1, col),
            Direction::South if wrapping => (0, col),
            Direction::West if col > 0 => (row, col - 1),
            Direction::West if wrapping => (row, cols - 1),
            _ => return None,
        };
        Some(next_row * cols + next_col)
    }

    pub(crate) fn check_edge_at(&self, cell_index: usize, direction: Direction) -> EdgeStatus {
        let here = self.piece_at(cell_index).has_connector(direction);
        let there = match self.neighbor_idx(cell_index, direction) {
            Some(next) => self.piece_at(next).has_connector(direction.opposite()),
            // a connector facing the border can never be matched
            None => false,
        };

        match (here, there) {
            (true, true) => EdgeStatus::Match,
            (false, false) => EdgeStatus::NoEdge,
            _ => EdgeStatus::Mismatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{Piece, Shape};

    /// Connector rule written per shape rather than through the mask table.
    fn expected_half_edge(shape: Shape, orientation: Direction, side: Direction) -> bool {
        match shape {
            Shape::Empty => false,
            Shape::Cross => true,
            Shape::Endpoint => side == orientation,
            Shape::Segment => side.index() % 2 == orientation.index() % 2,
            Shape::Corner => side == orientation || side == orientation.rotated(1),
            Shape::Tee => side != orientation.opposite(),
        }
    }

    #[test]
    fn test_half_edges_follow_shape_rules() {
        let mut grid = Grid::new(1, 1, false).unwrap();
        for shape in Shape::ALL {
            for orientation in Direction::ALL {
                grid.set_piece(0, 0, Piece::new(shape, orientation));
                for side in Direction::ALL {
                    assert_eq!(
                        grid.has_half_edge(0, 0, side),
                        expected_half_edge(shape, orientation, side),
                        "{shape:?} facing {orientation:?}, side {side:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_neighbors_stop_at_border_without_wrapping() {
        let grid = Grid::new(3, 4, false).unwrap();
        assert_eq!(grid.neighbor(0, 0, Direction::North), None);
        assert_eq!(grid.neighbor(0, 0, Direction::West), None);
        assert_eq!(grid.neighbor(2, 3, Direction::South), None);
        assert_eq!(grid.neighbor(2, 3, Direction::East), None);
        assert_eq!(grid.neighbor(1, 1, Direction::North), Some((0, 1)));
        assert_eq!(grid.neighbor(1, 1, Direction::East), Some((1, 2)));
        assert_eq!(grid.neighbor(1, 1, Direction::South), Some((2, 1)));
        assert_eq!(grid.neighbor(1, 1, Direction::West), Some((1, 0)));
    }

    #[test]
    fn test_neighbors_wrap_around_the_torus() {
        let grid = Grid::new(3, 4, true).unwrap();
        assert_eq!(grid.neighbor(0, 0, Direction::North), Some((2, 0)));
        assert_eq!(grid.neighbor(0, 0, Direction::West), Some((0, 3)));
        assert_eq!(grid.neighbor(2, 3, Direction::South), Some((0, 3)));
        assert_eq!(grid.neighbor(2, 3, Direction::East), Some((2, 0)));

        let single = Grid::new(1, 1, true).unwrap();
        for dir in Direction::ALL {
            assert_eq!(single.neighbor(0, 0, dir), Some((0, 0)));
        }
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_neighbor_of_missing_cell_panics() {
        let grid = Grid::new(2, 2, true).unwrap();
        grid.neighbor(2, 0, Direction::North);
    }

    #[test]
    fn test_check_edge_statuses() {
        let mut grid = Grid::new(1, 3, false).unwrap();
        grid.set_piece(0, 0, Piece::new(Shape::Endpoint, Direction::East));
        grid.set_piece(0, 1, Piece::new(Shape::Endpoint, Direction::West));

        assert_eq!(grid.check_edge(0, 0, Direction::East), EdgeStatus::Match);
        assert_eq!(grid.check_edge(0, 1, Direction::West), EdgeStatus::Match);
        assert_eq!(grid.check_edge(0, 1, Direction::East), EdgeStatus::NoEdge);
        assert_eq!(grid.check_edge(0, 0, Direction::North), EdgeStatus::NoEdge);

        // connector towards an empty cell
        grid.set_orientation(0, 1, Direction::East);
        assert_eq!(grid.check_edge(0, 1, Direction::East), EdgeStatus::Mismatch);
        assert_eq!(grid.check_edge(0, 2, Direction::West), EdgeStatus::Mismatch);
        assert_eq!(grid.check_edge(0, 0, Direction::East), EdgeStatus::Mismatch);

        // connector towards the border
        grid.set_orientation(0, 0, Direction::West);
        assert_eq!(grid.check_edge(0, 0, Direction::West), EdgeStatus::Mismatch);
    }

    #[test]
    fn test_single_cross_matches_itself_when_wrapping() {
        let mut grid = Grid::new(1, 1, true).unwrap();
        grid.set_shape(0, 0, Shape::Cross);
        for dir in Direction::ALL {
            assert_eq!(grid.check_edge(0, 0, dir), EdgeStatus::Match);
        }

        grid.set_shape(0, 0, Shape::Endpoint);
        assert_eq!(grid.check_edge(0, 0, Direction::North), EdgeStatus::Mismatch);
        assert_eq!(grid.check_edge(0, 0, Direction::South), EdgeStatus::Mismatch);
        assert_eq!(grid.check_edge(0, 0, Direction::East), EdgeStatus::NoEdge);
    }
}
