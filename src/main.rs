//! Pipes Puzzle
//!
//! Command line front end: solves and counts saved puzzles, generates random
//! ones and plays them interactively in the terminal. Without a subcommand it
//! starts a game on the built-in 5x5 puzzle.

use std::collections::VecDeque;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use pipes::{generator, persistence, GeneratorConfig, Grid, PuzzleOps};

/// Rotate the pieces until every pipe is connected.
#[derive(Parser)]
#[command(name = "pipes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a saved puzzle, print the solution and optionally save it.
    Solve {
        input: PathBuf,
        output: Option<PathBuf>,
    },
    /// Count the solutions of a saved puzzle.
    Count {
        input: PathBuf,
        /// Write the count to this file instead of printing it.
        output: Option<PathBuf>,
    },
    /// Generate a random puzzle.
    Random {
        #[arg(long, default_value_t = 5)]
        rows: usize,
        #[arg(long, default_value_t = 5)]
        cols: usize,
        #[arg(long)]
        wrapping: bool,
        /// Number of empty cells.
        #[arg(long, default_value_t = 0)]
        empty: usize,
        /// Number of edges added on top of the spanning tree.
        #[arg(long, default_value_t = 0)]
        extra: usize,
        /// Shuffle orientations so the puzzle starts unsolved.
        #[arg(long)]
        shuffle: bool,
        /// Seed for a reproducible puzzle.
        #[arg(long)]
        seed: Option<u64>,
        output: Option<PathBuf>,
    },
    /// Print a saved puzzle.
    Show { input: PathBuf },
    /// Play in the terminal, on a saved puzzle or the built-in one.
    Play { input: Option<PathBuf> },
}

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve { input, output }) => run_solve(&input, output.as_deref()),
        Some(Command::Count { input, output }) => run_count(&input, output.as_deref()),
        Some(Command::Random {
            rows,
            cols,
            wrapping,
            empty,
            extra,
            shuffle,
            seed,
            output,
        }) => {
            let config = GeneratorConfig {
                rows,
                cols,
                wrapping,
                nb_empty: empty,
                nb_extra: extra,
            };
            run_random(&config, shuffle, seed, output.as_deref())
        }
        Some(Command::Show { input }) => run_show(&input),
        Some(Command::Play { input }) => run_play(input.as_deref()),
        None => run_play(None),
    }
}

fn load(path: &Path) -> Result<Grid> {
    let grid = persistence::load(path)
        .with_context(|| format!("failed to load puzzle from {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = grid.rows(),
        cols = grid.cols(),
        wrapping = grid.is_wrapping(),
        "loaded puzzle"
    );
    Ok(grid)
}

fn save(grid: &Grid, path: &Path) -> Result<()> {
    grid.save(path)
        .with_context(|| format!("failed to save puzzle to {}", path.display()))?;
    info!(path = %path.display(), "saved puzzle");
    Ok(())
}

/// Solves a saved puzzle; fails if it has no solution.
fn run_solve(input: &Path, output: Option<&Path>) -> Result<()> {
    let mut grid = load(input)?;
    if !grid.solve() {
        bail!("{} has no solution", input.display());
    }

    print!("{}", grid.format());
    if let Some(output) = output {
        save(&grid, output)?;
    }
    Ok(())
}

/// Prints the number of solutions, or writes it to `output`.
fn run_count(input: &Path, output: Option<&Path>) -> Result<()> {
    let mut grid = load(input)?;
    let count = grid.count_solutions();

    match output {
        Some(output) => fs::write(output, format!("{count}\n"))
            .with_context(|| format!("failed to write count to {}", output.display()))?,
        None => println!("{count}"),
    }
    Ok(())
}

/// Generates a puzzle, prints it and optionally saves it.
fn run_random(
    config: &GeneratorConfig,
    shuffle: bool,
    seed: Option<u64>,
    output: Option<&Path>,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut grid = generator::generate(config, &mut rng).context("failed to generate puzzle")?;
    if shuffle {
        grid.shuffle_orientation_with(&mut rng);
    }

    print!("{}", grid.format());
    if let Some(output) = output {
        save(&grid, output)?;
    }
    Ok(())
}

fn run_show(input: &Path) -> Result<()> {
    let grid = load(input)?;
    print!("{}", grid.format());
    println!(
        "{}x{}{}, {}",
        grid.rows(),
        grid.cols(),
        if grid.is_wrapping() { " wrapping" } else { "" },
        if grid.is_won() { "solved" } else { "unsolved" }
    );
    Ok(())
}

fn run_play(input: Option<&Path>) -> Result<()> {
    let mut grid = match input {
        Some(path) => load(path)?,
        None => Grid::default_puzzle(),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    play(&mut grid, stdin.lock(), &mut stdout)?;
    Ok(())
}

/// How an interactive game ended.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Won,
    Quit,
    /// Input ran out before the puzzle was solved.
    Abandoned,
}

/// Whitespace separated tokens read lazily from line-based input.
struct Tokens<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    fn next(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}

const HELP: &str = "\
Available commands:
h : show this help
r : shuffle the grid
q : quit
c i j : rotate the piece at (i, j) clockwise
a i j : rotate the piece at (i, j) counter-clockwise
z : undo the last move
y : redo the last undone move
";

/// Runs the interactive game loop until the grid is won, the player quits
/// or the input ends.
fn play<R: BufRead, W: Write>(grid: &mut Grid, input: R, out: &mut W) -> Result<Outcome> {
    let mut tokens = Tokens::new(input);

    let outcome = loop {
        if grid.is_won() {
            break Outcome::Won;
        }
        write!(out, "{}", grid.format())?;
        writeln!(out, "\nEnter a command (h for help):")?;

        let Some(command) = tokens.next()? else {
            break Outcome::Abandoned;
        };
        match command.as_str() {
            "h" => write!(out, "{HELP}")?,
            "r" => {
                grid.shuffle_orientation();
                writeln!(out, "Grid has been shuffled")?;
            }
            "q" => break Outcome::Quit,
            "z" => {
                if grid.undo().is_none() {
                    writeln!(out, "Nothing to undo")?;
                }
            }
            "y" => {
                if grid.redo().is_none() {
                    writeln!(out, "Nothing to redo")?;
                }
            }
            "c" | "a" => {
                let row = tokens.next()?;
                let col = tokens.next()?;
                match parse_coordinates(grid, row.as_deref(), col.as_deref()) {
                    Some((row, col)) => {
                        let quarter_turns = if command == "c" { 1 } else { -1 };
                        grid.play_move(row, col, quarter_turns);
                    }
                    None => writeln!(out, "Invalid coordinates")?,
                }
            }
            other => writeln!(out, "Unknown command '{other}' (h for help)")?,
        }
    };

    write!(out, "{}", grid.format())?;
    match outcome {
        Outcome::Won => writeln!(out, "Congratulations: you solved the puzzle!")?,
        Outcome::Quit => writeln!(out, "You gave up. Better luck next time!")?,
        Outcome::Abandoned => {}
    }
    Ok(outcome)
}

fn parse_coordinates(grid: &Grid, row: Option<&str>, col: Option<&str>) -> Option<(usize, usize)> {
    let row: usize = row?.parse().ok()?;
    let col: usize = col?.parse().ok()?;
    (row < grid.rows() && col < grid.cols()).then_some((row, col))
}
