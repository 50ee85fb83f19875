//! Example demonstrating Numberlink puzzle generation.
//!
//! This example shows how to:
//! - Create a `PuzzleGenerator`
//! - Generate a random puzzle of a given size
//! - Display the puzzle, solution, and seed
//! - Pick the puzzle that is hardest for the solver out of many samples
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_puzzle -- --width 8 --height 8
//! ```
//!
//! Reproduce a puzzle from its seed:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --seed c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1
//! ```
//!
//! Sample many puzzles in parallel and keep the one needing the most solver
//! calls:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --samples 1000
//! ```

use std::process;

use clap::Parser;
use numberlink_generator::{GeneratedPuzzle, PuzzleGenerator, PuzzleSeed};
use numberlink_solver::{BacktrackSolver, SearchGrid, SolverStats};
use rayon::prelude::*;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board width.
    #[arg(long, default_value_t = 7)]
    width: usize,

    /// Board height.
    #[arg(long, default_value_t = 7)]
    height: usize,

    /// Seed to reproduce (64 hex digits).
    #[arg(long, value_name = "HEX")]
    seed: Option<PuzzleSeed>,

    /// Number of puzzles to sample; the hardest one is printed.
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    samples: usize,
}

fn main() {
    let args = Args::parse();
    let generator = PuzzleGenerator::new();

    if args.samples == 0 {
        eprintln!("--samples must be at least 1.");
        process::exit(1);
    }

    let generate = |seed: PuzzleSeed| {
        let puzzle = match generator.generate_with_seed(args.width, args.height, seed) {
            Ok(puzzle) => puzzle,
            Err(err) => {
                eprintln!("Cannot generate puzzle: {err}");
                process::exit(1);
            }
        };
        let stats = solve_stats(&puzzle);
        (puzzle, stats)
    };

    if let Some(seed) = args.seed {
        let (puzzle, stats) = generate(seed);
        print_puzzle(&puzzle, &stats, None);
        return;
    }

    let best = (0..args.samples)
        .into_par_iter()
        .map(|_| generate(PuzzleSeed::random()))
        .max_by_key(|(_, stats)| stats.calls());

    if let Some((puzzle, stats)) = best {
        print_puzzle(&puzzle, &stats, Some(args.samples));
    }
}

fn solve_stats(puzzle: &GeneratedPuzzle) -> SolverStats {
    let grid = puzzle.puzzle_grid().unwrap();
    let mut search = SearchGrid::new(grid);
    let (solved, stats) = BacktrackSolver::new().solve(&mut search);
    assert!(solved);
    stats
}

fn print_puzzle(puzzle: &GeneratedPuzzle, stats: &SolverStats, samples: Option<usize>) {
    println!("Seed:");
    println!("  {}", puzzle.seed);
    println!();

    if let Some(samples) = samples {
        println!("Selection:");
        println!("  Samples: {samples}");
        println!();
    }

    println!("Puzzle ({} flows):", puzzle.flows());
    for row in &puzzle.puzzle {
        println!("  {row}");
    }
    println!();
    println!("Solution:");
    for row in &puzzle.solution {
        println!("  {row}");
    }
    println!();

    println!("Stats:");
    println!("  calls: {}", stats.calls());
    println!("  backtracks: {}", stats.backtracks());
    println!("  rejected: {}", stats.rejected());
}
