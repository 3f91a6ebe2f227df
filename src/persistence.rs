//! Text format for saving and loading grids.
//!
//! Format (whitespace separated):
//! - header: `<rows> <cols> <wrapping>`, wrapping being `0` or `1`
//! - then `rows` lines of `cols` cells, each cell a two-character token: the
//!   shape (`E`mpty, e`N`dpoint, `S`egment, `C`orner, `T`ee, cross `X`)
//!   followed by the direction (`N`, `E`, `S`, `W`)
//!
//! ```text
//! 2 3 1
//! NE CS EN
//! NE TW EN
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::{FormatError, GridError, PersistenceError};
use crate::grid::Grid;
use crate::pieces::{Direction, Piece, Shape};

/// Serializes a grid to the text format.
pub fn to_text(grid: &Grid) -> String {
    let mut output = format!(
        "{} {} {}\n",
        grid.rows(),
        grid.cols(),
        u8::from(grid.is_wrapping())
    );

    for row in 0..grid.rows() {
        let cells: Vec<String> = (0..grid.cols())
            .map(|col| {
                let piece = grid.piece(row, col);
                format!("{}{}", piece.shape.code(), piece.orientation.code())
            })
            .collect();
        output.push_str(&cells.join(" "));
        output.push('\n');
    }

    output
}

/// Parses a grid from the text format.
///
/// The whole input must be a valid grid; nothing is loaded on error.
pub fn from_text(text: &str) -> Result<Grid, FormatError> {
    let mut tokens = text.split_whitespace();

    let rows = next_number(&mut tokens, "row count")?;
    let cols = next_number(&mut tokens, "column count")?;
    let wrapping = match tokens.next() {
        Some("0") => false,
        Some("1") => true,
        Some(other) => return Err(FormatError::InvalidWrapping(other.to_string())),
        None => return Err(FormatError::MissingValue("wrapping flag")),
    };

    if rows == 0 || cols == 0 {
        return Err(GridError::InvalidDimensions { rows, cols }.into());
    }
    let cell_count = rows
        .checked_mul(cols)
        .ok_or(GridError::TooLarge { rows, cols })?;

    let mut shapes = Vec::new();
    let mut orientations = Vec::new();
    for idx in 0..cell_count {
        let (row, col) = (idx / cols, idx % cols);
        let token = tokens.next().ok_or(FormatError::MissingValue("cell"))?;
        let piece = parse_cell(token, row, col)?;
        shapes.push(piece.shape);
        orientations.push(piece.orientation);
    }

    if let Some(extra) = tokens.next() {
        return Err(FormatError::TrailingData(extra.to_string()));
    }

    Ok(Grid::from_pieces(rows, cols, wrapping, &shapes, &orientations)?)
}

fn next_number<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &'static str,
) -> Result<usize, FormatError> {
    let token = tokens.next().ok_or(FormatError::MissingValue(what))?;
    token.parse().map_err(|_| FormatError::InvalidNumber {
        what,
        token: token.to_string(),
    })
}

fn parse_cell(token: &str, row: usize, col: usize) -> Result<Piece, FormatError> {
    let mut chars = token.chars();
    let (Some(shape_code), Some(dir_code), None) = (chars.next(), chars.next(), chars.next())
    else {
        return Err(FormatError::InvalidToken {
            row,
            col,
            token: token.to_string(),
        });
    };

    let shape = Shape::from_code(shape_code).ok_or(FormatError::UnknownShape {
        row,
        col,
        code: shape_code,
    })?;
    let orientation = Direction::from_code(dir_code).ok_or(FormatError::UnknownDirection {
        row,
        col,
        code: dir_code,
    })?;
    Ok(Piece::new(shape, orientation))
}

/// Writes a grid to `path` in the text format.
pub fn save(grid: &Grid, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
    let mut file = File::create(path)?;
    file.write_all(to_text(grid).as_bytes())?;
    Ok(())
}

/// Reads a grid from a file in the text format.
pub fn load(path: impl AsRef<Path>) -> Result<Grid, PersistenceError> {
    let text = fs::read_to_string(path)?;
    Ok(from_text(&text)?)
}
