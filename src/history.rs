//! Player moves with linear undo/redo.
//!
//! Every move played is pushed on the undo stack and clears the redo stack.
//! Undoing pops a move, rotates the piece back and pushes the move on the redo
//! stack; redoing does the opposite.

use rand::Rng;
use tracing::debug;

use crate::grid::Grid;
use crate::pieces::Direction;

/// One rotation applied by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub row: usize,
    pub col: usize,
    /// Clockwise quarter turns; negative values rotate counter-clockwise.
    pub quarter_turns: i32,
}

/// Undo and redo stacks of a grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    undo: Vec<Move>,
    redo: Vec<Move>,
}

impl History {
    /// Moves that can be undone, oldest first.
    pub fn undo_moves(&self) -> &[Move] {
        &self.undo
    }

    /// Moves that can be redone, the next one last.
    pub fn redo_moves(&self) -> &[Move] {
        &self.redo
    }

    fn record(&mut self, played: Move) {
        self.undo.push(played);
        self.redo.clear();
    }

    fn pop_undo(&mut self) -> Option<Move> {
        let played = self.undo.pop()?;
        self.redo.push(played);
        Some(played)
    }

    fn pop_redo(&mut self) -> Option<Move> {
        let played = self.redo.pop()?;
        self.undo.push(played);
        Some(played)
    }
}

impl Grid {
    /// Rotates the piece at (row, col) and records the move.
    ///
    /// # Panics
    ///
    /// Panics if (row, col) is outside the grid.
    pub fn play_move(&mut self, row: usize, col: usize, quarter_turns: i32) {
        let idx = self.coord_to_idx(row, col);
        self.history.record(Move {
            row,
            col,
            quarter_turns,
        });
        self.rotate_at(idx, quarter_turns);
    }

    /// Reverts the last move. Returns the reverted move, or `None` if there
    /// was nothing to undo.
    pub fn undo(&mut self) -> Option<Move> {
        let Some(played) = self.history.pop_undo() else {
            debug!("no move to undo");
            return None;
        };
        let idx = self.coord_to_idx(played.row, played.col);
        self.rotate_at(idx, -played.quarter_turns.rem_euclid(4));
        Some(played)
    }

    /// Replays the last undone move. Returns it, or `None` if there was
    /// nothing to redo.
    pub fn redo(&mut self) -> Option<Move> {
        let Some(played) = self.history.pop_redo() else {
            debug!("no move to redo");
            return None;
        };
        let idx = self.coord_to_idx(played.row, played.col);
        self.rotate_at(idx, played.quarter_turns);
        Some(played)
    }

    pub fn can_undo(&self) -> bool {
        !self.history.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.history.redo.is_empty()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Turns every piece to face North. The history is kept as is.
    pub fn reset_orientation(&mut self) {
        for idx in 0..self.cell_count() {
            let piece = self.piece_at(idx);
            self.set_piece_at(idx, piece.with_orientation(Direction::North));
        }
    }

    /// Gives every piece an independent, uniformly random orientation.
    pub fn shuffle_orientation(&mut self) {
        self.shuffle_orientation_with(&mut rand::thread_rng());
    }

    /// Like [`Grid::shuffle_orientation`], drawing from `rng`.
    pub fn shuffle_orientation_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for idx in 0..self.cell_count() {
            let piece = self.piece_at(idx);
            let orientation = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
            self.set_piece_at(idx, piece.with_orientation(orientation));
        }
    }

    fn rotate_at(&mut self, cell_index: usize, quarter_turns: i32) {
        let piece = self.piece_at(cell_index);
        self.set_piece_at(cell_index, piece.rotated(quarter_turns));
    }
}
