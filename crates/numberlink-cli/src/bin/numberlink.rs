//! Numberlink command-line solver and generator.
//!
//! Reads puzzles from standard input and prints their solutions:
//!
//! ```sh
//! printf '4 1\nA..A\n' | numberlink --tubes --colors
//! ```
//!
//! Or generates a puzzle:
//!
//! ```sh
//! numberlink --generate 8x8 --solution
//! ```

use std::{io, process};

use clap::Parser;
use numberlink_cli::{
    render::{RenderStyle, Renderer},
    run::{self, BoardSize, SolveOptions},
};
use numberlink_generator::PuzzleSeed;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Make the output more readable with colors.
    #[arg(long)]
    colors: bool,

    /// Draw lines between the endpoints.
    #[arg(long)]
    tubes: bool,

    /// Print the number of solver calls after each puzzle.
    #[arg(long)]
    calls: bool,

    /// Print only the total number of solver calls.
    #[arg(long, conflicts_with_all = ["calls", "tubes", "colors"])]
    calls_only: bool,

    /// Generate a puzzle of the given size instead of solving, e.g. 5x5.
    #[arg(long, value_name = "WxH")]
    generate: Option<BoardSize>,

    /// Seed of the generated puzzle (64 hex digits).
    #[arg(long, value_name = "HEX", requires = "generate")]
    seed: Option<PuzzleSeed>,

    /// Also print the solution of the generated puzzle.
    #[arg(long, requires = "generate")]
    solution: bool,
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let mut out = io::stdout().lock();

    let result = if let Some(size) = args.generate {
        run::generate(size, args.seed, args.solution, &mut out).map(|_| ())
    } else {
        let style = if args.tubes {
            RenderStyle::Tubes
        } else {
            RenderStyle::Simple
        };
        let options = SolveOptions {
            renderer: Renderer::new(style).with_colors(args.colors),
            calls: args.calls,
            calls_only: args.calls_only,
        };
        run::solve_stream(io::stdin().lock(), &mut out, options).map(|_| ())
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
