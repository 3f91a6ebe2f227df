//! Grid representation for rotation puzzles.
//!
//! The grid is a flat row-major array of pieces with its dimensions and the
//! wrapping flag. A grid also owns the undo/redo history of the moves played
//! on it; the history is not part of its identity, so it is neither cloned nor
//! compared.

use std::fmt;

use crate::error::GridError;
use crate::history::History;
use crate::pieces::{
    Direction, Piece, Shape, DEFAULT_ORIENTATIONS, DEFAULT_SHAPES, DEFAULT_SIZE,
    DEFAULT_SOLUTION,
};

/// A rectangular grid of rotatable pieces.
#[derive(Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    wrapping: bool,
    cells: Vec<Piece>,
    pub(crate) history: History,
}

impl Grid {
    /// Creates a grid of empty pieces, all facing North.
    pub fn new(rows: usize, cols: usize, wrapping: bool) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        let cell_count = rows
            .checked_mul(cols)
            .ok_or(GridError::TooLarge { rows, cols })?;
        Ok(Self {
            rows,
            cols,
            wrapping,
            cells: vec![Piece::EMPTY; cell_count],
            history: History::default(),
        })
    }

    /// Creates a grid from row-major shape and orientation arrays.
    pub fn from_pieces(
        rows: usize,
        cols: usize,
        wrapping: bool,
        shapes: &[Shape],
        orientations: &[Direction],
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(rows, cols, wrapping)?;
        let expected = grid.cells.len();
        if shapes.len() != expected {
            return Err(GridError::LengthMismatch {
                what: "shapes",
                expected,
                actual: shapes.len(),
            });
        }
        if orientations.len() != expected {
            return Err(GridError::LengthMismatch {
                what: "orientations",
                expected,
                actual: orientations.len(),
            });
        }

        for (cell, (&shape, &orientation)) in grid
            .cells
            .iter_mut()
            .zip(shapes.iter().zip(orientations))
        {
            *cell = Piece::new(shape, orientation);
        }
        Ok(grid)
    }

    /// The built-in 5x5 puzzle, not yet solved.
    pub fn default_puzzle() -> Self {
        Self::builtin(&DEFAULT_ORIENTATIONS)
    }

    /// The built-in 5x5 puzzle in its solved orientation.
    pub fn default_solution() -> Self {
        Self::builtin(&DEFAULT_SOLUTION)
    }

    fn builtin(orientations: &[Direction]) -> Self {
        let mut grid = Self {
            rows: DEFAULT_SIZE,
            cols: DEFAULT_SIZE,
            wrapping: false,
            cells: vec![Piece::EMPTY; DEFAULT_SIZE * DEFAULT_SIZE],
            history: History::default(),
        };
        for (cell, (&shape, &orientation)) in grid
            .cells
            .iter_mut()
            .zip(DEFAULT_SHAPES.iter().zip(orientations))
        {
            *cell = Piece::new(shape, orientation);
        }
        grid
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_wrapping(&self) -> bool {
        self.wrapping
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Converts (row, col) to a linear cell index.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the grid.
    #[inline]
    pub fn coord_to_idx(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) is outside the {}x{} grid",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    /// Converts a linear cell index to (row, col).
    #[inline]
    pub fn idx_to_coord(&self, cell_index: usize) -> (usize, usize) {
        (cell_index / self.cols, cell_index % self.cols)
    }

    /// All pieces in row-major order.
    pub fn pieces(&self) -> &[Piece] {
        &self.cells
    }

    #[inline]
    pub fn piece(&self, row: usize, col: usize) -> Piece {
        self.cells[self.coord_to_idx(row, col)]
    }

    #[inline]
    pub fn shape(&self, row: usize, col: usize) -> Shape {
        self.piece(row, col).shape
    }

    #[inline]
    pub fn orientation(&self, row: usize, col: usize) -> Direction {
        self.piece(row, col).orientation
    }

    pub fn set_piece(&mut self, row: usize, col: usize, piece: Piece) {
        let idx = self.coord_to_idx(row, col);
        self.cells[idx] = piece;
    }

    pub fn set_shape(&mut self, row: usize, col: usize, shape: Shape) {
        let idx = self.coord_to_idx(row, col);
        self.cells[idx].shape = shape;
    }

    pub fn set_orientation(&mut self, row: usize, col: usize, orientation: Direction) {
        let idx = self.coord_to_idx(row, col);
        self.cells[idx].orientation = orientation;
    }

    pub(crate) fn piece_at(&self, cell_index: usize) -> Piece {
        self.cells[cell_index]
    }

    pub(crate) fn set_piece_at(&mut self, cell_index: usize, piece: Piece) {
        self.cells[cell_index] = piece;
    }

    /// Compares two grids, optionally ignoring orientations.
    ///
    /// Dimensions, shapes and the wrapping flag are always compared.
    pub fn equals(&self, other: &Grid, ignore_orientation: bool) -> bool {
        if self.rows != other.rows || self.cols != other.cols || self.wrapping != other.wrapping {
            return false;
        }
        self.cells.iter().zip(&other.cells).all(|(a, b)| {
            a.shape == b.shape && (ignore_orientation || a.orientation == b.orientation)
        })
    }
}

impl Clone for Grid {
    /// Copies the cells and flags; the copy starts with an empty history.
    fn clone(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            wrapping: self.wrapping,
            cells: self.cells.clone(),
            history: History::default(),
        }
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, false)
    }
}

impl Eq for Grid {}

/// Returns the character drawn for a piece.
pub fn glyph(piece: Piece) -> char {
    use Direction::{East, North, South, West};

    match (piece.shape, piece.orientation) {
        (Shape::Empty, _) => ' ',
        (Shape::Endpoint, North) => '^',
        (Shape::Endpoint, East) => '>',
        (Shape::Endpoint, South) => 'v',
        (Shape::Endpoint, West) => '<',
        (Shape::Segment, North | South) => '|',
        (Shape::Segment, East | West) => '-',
        (Shape::Corner, North) => '└',
        (Shape::Corner, East) => '┌',
        (Shape::Corner, South) => '┐',
        (Shape::Corner, West) => '┘',
        (Shape::Tee, North) => '┴',
        (Shape::Tee, East) => '├',
        (Shape::Tee, South) => '┬',
        (Shape::Tee, West) => '┤',
        (Shape::Cross, _) => '+',
    }
}

/// Formats a grid as a human-readable string.
///
/// Column indices (last digit only) run along the top, row indices down the
/// left side, and each piece is drawn as one glyph followed by a space.
pub fn format_grid(grid: &Grid) -> String {
    let label_width = (grid.rows() - 1).to_string().len();
    let mut output = String::new();

    output.push_str(&" ".repeat(label_width + 1));
    for col in 0..grid.cols() {
        output.push_str(&format!(" {}", col % 10));
    }
    output.push('\n');

    let border = format!("{}{}\n", " ".repeat(label_width + 2), "--".repeat(grid.cols()));
    output.push_str(&border);

    for row in 0..grid.rows() {
        output.push_str(&format!("{row:>label_width$} |"));
        for col in 0..grid.cols() {
            output.push(glyph(grid.piece(row, col)));
            output.push(' ');
        }
        output.push_str("|\n");
    }

    output.push_str(&border);
    output
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_grid(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty_and_north() {
        let grid = Grid::new(3, 4, true).unwrap();
        assert_eq!((grid.rows(), grid.cols(), grid.cell_count()), (3, 4, 12));
        assert!(grid.is_wrapping());
        assert!(grid.pieces().iter().all(|&piece| piece == Piece::EMPTY));
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert_eq!(
            Grid::new(0, 3, false).unwrap_err(),
            GridError::InvalidDimensions { rows: 0, cols: 3 }
        );
        assert!(Grid::new(2, 0, true).is_err());
    }

    #[test]
    fn test_new_rejects_overflowing_size() {
        let huge = 1 << (usize::BITS / 2);
        assert_eq!(
            Grid::new(huge, huge, false).unwrap_err(),
            GridError::TooLarge {
                rows: huge,
                cols: huge
            }
        );
        assert!(Grid::new(usize::MAX, 2, true).is_err());
    }

    #[test]
    fn test_from_pieces_checks_lengths() {
        let shapes = [Shape::Endpoint, Shape::Endpoint];
        let orientations = [Direction::East, Direction::West];
        let grid = Grid::from_pieces(1, 2, false, &shapes, &orientations).unwrap();
        assert_eq!(grid.piece(0, 1), Piece::new(Shape::Endpoint, Direction::West));

        let err = Grid::from_pieces(2, 2, false, &shapes, &orientations).unwrap_err();
        assert_eq!(
            err,
            GridError::LengthMismatch {
                what: "shapes",
                expected: 4,
                actual: 2
            }
        );
        let err = Grid::from_pieces(1, 2, false, &shapes, &orientations[..1]).unwrap_err();
        assert!(matches!(err, GridError::LengthMismatch { what: "orientations", .. }));
    }

    #[test]
    fn test_setters_touch_a_single_cell() {
        let mut grid = Grid::new(2, 3, false).unwrap();
        grid.set_shape(1, 2, Shape::Tee);
        grid.set_orientation(1, 2, Direction::South);
        assert_eq!(grid.piece(1, 2), Piece::new(Shape::Tee, Direction::South));
        assert_eq!(grid.pieces().iter().filter(|p| **p != Piece::EMPTY).count(), 1);
        assert_eq!(grid.coord_to_idx(1, 2), 5);
        assert_eq!(grid.idx_to_coord(5), (1, 2));
    }

    #[test]
    #[should_panic(expected = "outside the 2x3 grid")]
    fn test_out_of_range_access_panics() {
        let grid = Grid::new(2, 3, false).unwrap();
        grid.shape(2, 0);
    }

    #[test]
    #[should_panic(expected = "outside the 2x3 grid")]
    fn test_out_of_range_write_panics() {
        let mut grid = Grid::new(2, 3, false).unwrap();
        grid.set_orientation(0, 3, Direction::East);
    }

    #[test]
    fn test_equality_can_ignore_orientation() {
        let puzzle = Grid::default_puzzle();
        let solution = Grid::default_solution();
        assert_ne!(puzzle, solution);
        assert!(puzzle.equals(&solution, true));

        let mut wrapped = Grid::new(5, 5, true).unwrap();
        for idx in 0..puzzle.cell_count() {
            wrapped.set_piece_at(idx, puzzle.piece_at(idx));
        }
        assert!(!wrapped.equals(&puzzle, true));
    }

    #[test]
    fn test_clone_copies_cells_but_not_history() {
        let mut grid = Grid::default_puzzle();
        grid.play_move(0, 0, 1);
        let copy = grid.clone();
        assert_eq!(copy, grid);
        assert!(grid.can_undo());
        assert!(!copy.can_undo());
    }

    #[test]
    fn test_format_small_grid() {
        let grid = Grid::from_pieces(
            1,
            2,
            false,
            &[Shape::Endpoint, Shape::Endpoint],
            &[Direction::East, Direction::West],
        )
        .unwrap();
        assert_eq!(format_grid(&grid), "   0 1\n   ----\n0 |> < |\n   ----\n");
        assert_eq!(grid.to_string(), format_grid(&grid));
    }

    #[test]
    fn test_glyphs_follow_orientation() {
        assert_eq!(glyph(Piece::new(Shape::Corner, Direction::North)), '└');
        assert_eq!(glyph(Piece::new(Shape::Tee, Direction::West)), '┤');
        assert_eq!(glyph(Piece::new(Shape::Segment, Direction::South)), '|');
        assert_eq!(glyph(Piece::new(Shape::Cross, Direction::East)), '+');
        assert_eq!(glyph(Piece::EMPTY), ' ');
    }
}
