//! Random puzzle generation.
//!
//! A puzzle is grown as a random spanning tree: two facing endpoints are
//! placed first, then pieces are attached one edge at a time to random cells
//! of the tree. Each attachment adds a connector on both sides, and the
//! connector mask decides the resulting shape, so an endpoint gaining a second
//! connector becomes a segment or a corner, and so on. Extra edges between
//! pieces of the tree are added last to create cycles.
//!
//! Pieces come out in their solved orientation; shuffle them to get a puzzle.

use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::{GenerateError, Infeasibility};
use crate::grid::Grid;
use crate::pieces::{Direction, Shape};

/// Parameters of a generated puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub rows: usize,
    pub cols: usize,
    pub wrapping: bool,
    /// Number of cells left empty.
    pub nb_empty: usize,
    /// Number of edges added on top of the spanning tree.
    pub nb_extra: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            wrapping: false,
            nb_empty: 0,
            nb_extra: 0,
        }
    }
}

/// Generates a solved puzzle using the thread-local random generator.
pub fn random(
    rows: usize,
    cols: usize,
    wrapping: bool,
    nb_empty: usize,
    nb_extra: usize,
) -> Result<Grid, GenerateError> {
    let config = GeneratorConfig {
        rows,
        cols,
        wrapping,
        nb_empty,
        nb_extra,
    };
    generate(&config, &mut rand::thread_rng())
}

/// Generates a solved puzzle drawing from `rng`.
pub fn generate<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Grid, GenerateError> {
    let mut grid = Grid::new(config.rows, config.cols, config.wrapping)?;
    let cells = grid.cell_count();

    if config.nb_empty > cells {
        return Err(Infeasibility::TooManyEmpty {
            nb_empty: config.nb_empty,
            cells,
        }
        .into());
    }
    if config.nb_empty + 1 == cells {
        return Err(Infeasibility::SinglePiece.into());
    }
    if config.nb_empty == cells {
        debug!(rows = config.rows, cols = config.cols, "generated an empty grid");
        return Ok(grid);
    }

    let max_extra = (config.rows - 1) * (config.cols - 1);
    if config.nb_extra > max_extra {
        return Err(Infeasibility::TooManyExtra {
            nb_extra: config.nb_extra,
            max: max_extra,
        }
        .into());
    }

    let placed = grow_tree(&mut grid, cells - config.nb_empty, rng)?;
    add_extra_edges(&mut grid, &placed, config.nb_extra, rng)?;

    debug!(
        rows = config.rows,
        cols = config.cols,
        wrapping = config.wrapping,
        pieces = placed.len(),
        extra = config.nb_extra,
        "generated puzzle"
    );
    Ok(grid)
}

/// Grows a spanning tree of `piece_count` pieces and returns their cells.
fn grow_tree<R: Rng + ?Sized>(
    grid: &mut Grid,
    piece_count: usize,
    rng: &mut R,
) -> Result<Vec<usize>, GenerateError> {
    let first = rng.gen_range(0..grid.cell_count());
    let start = rng.gen_range(0..Direction::ALL.len());

    // a cell can be its own neighbor on a wrapping grid with one row or column
    let (dir, second) = (0..Direction::ALL.len())
        .map(|k| Direction::ALL[(start + k) % Direction::ALL.len()])
        .find_map(|dir| {
            grid.neighbor_idx(first, dir)
                .filter(|&next| next != first)
                .map(|next| (dir, next))
        })
        .ok_or(Infeasibility::SinglePiece)?;

    add_edge(grid, first, dir, second);
    let mut placed = Vec::with_capacity(piece_count);
    placed.push(first);
    placed.push(second);

    let mut directions = Direction::ALL;
    while placed.len() < piece_count {
        let from = placed[rng.gen_range(0..placed.len())];
        directions.shuffle(rng);

        let target = directions.iter().find_map(|&dir| {
            grid.neighbor_idx(from, dir)
                .filter(|&next| grid.piece_at(next).shape == Shape::Empty)
                .map(|next| (dir, next))
        });
        if let Some((dir, next)) = target {
            add_edge(grid, from, dir, next);
            placed.push(next);
        }
    }

    Ok(placed)
}

/// Adds `nb_extra` edges between pieces that are adjacent but not yet joined.
///
/// Half-edges that can never take a new edge are remembered so that the
/// search stops once every one of them has been ruled out.
fn add_extra_edges<R: Rng + ?Sized>(
    grid: &mut Grid,
    placed: &[usize],
    nb_extra: usize,
    rng: &mut R,
) -> Result<(), GenerateError> {
    let mut exhausted: FxHashSet<(usize, Direction)> = FxHashSet::default();
    let mut added = 0;

    while added < nb_extra {
        if exhausted.len() == placed.len() * Direction::ALL.len() {
            return Err(Infeasibility::NoRoomForExtra {
                added,
                requested: nb_extra,
            }
            .into());
        }

        let from = placed[rng.gen_range(0..placed.len())];
        let dir = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        if exhausted.contains(&(from, dir)) {
            continue;
        }

        let free_edge = grid.neighbor_idx(from, dir).filter(|&next| {
            next != from
                && grid.piece_at(next).shape != Shape::Empty
                && !grid.piece_at(from).has_connector(dir)
                && !grid.piece_at(next).has_connector(dir.opposite())
        });

        exhausted.insert((from, dir));
        if let Some(next) = free_edge {
            add_edge(grid, from, dir, next);
            exhausted.insert((next, dir.opposite()));
            added += 1;
        }
    }

    Ok(())
}

/// Joins two adjacent cells by giving each a connector facing the other.
fn add_edge(grid: &mut Grid, from: usize, dir: Direction, to: usize) {
    let here = grid.piece_at(from).with_connector(dir);
    grid.set_piece_at(from, here);
    let there = grid.piece_at(to).with_connector(dir.opposite());
    grid.set_piece_at(to, there);
}
