//! The solve and generate commands of the `numberlink` binary.

use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use numberlink_generator::{GeneratedPuzzle, GeneratorError, PuzzleGenerator, PuzzleSeed};
use numberlink_solver::{BacktrackSolver, SearchGrid, SolverStats};

use crate::{
    render::{RenderStyle, Renderer},
    stream::{PuzzleReader, StreamError},
};

/// Errors that stop a command.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum RunError {
    /// Writing the output failed.
    #[display("cannot write output: {_0}")]
    Io(#[from] io::Error),
    /// The puzzle stream is malformed.
    #[display("{_0}")]
    Stream(#[from] StreamError),
    /// The puzzle could not be generated.
    #[display("{_0}")]
    Generate(#[from] GeneratorError),
}

/// A board size written as `WIDTHxHEIGHT`, such as `5x5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    /// Board width.
    pub width: usize,
    /// Board height.
    pub height: usize,
}

/// Error returned when parsing a [`BoardSize`] fails.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("expected a size like 5x5, got {text:?}")]
pub struct BoardSizeParseError {
    text: String,
}

impl FromStr for BoardSize {
    type Err = BoardSizeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || BoardSizeParseError { text: s.to_owned() };
        let (width, height) = s.split_once(['x', 'X']).ok_or_else(error)?;
        let width = width.trim().parse().map_err(|_| error())?;
        let height = height.trim().parse().map_err(|_| error())?;
        Ok(Self { width, height })
    }
}

/// Output options of the solve command.
#[derive(Debug, Default, Clone, Copy)]
pub struct SolveOptions {
    /// How solutions are drawn.
    pub renderer: Renderer,
    /// Print the number of solver calls after each puzzle.
    pub calls: bool,
    /// Print only the total number of solver calls at the end.
    pub calls_only: bool,
}

impl From<RenderStyle> for SolveOptions {
    fn from(style: RenderStyle) -> Self {
        Self {
            renderer: Renderer::new(style),
            ..Self::default()
        }
    }
}

/// Solves every puzzle of `input`, writing the results to `out`.
///
/// Each puzzle is followed by a blank line. Unsolvable puzzles print
/// `IMPOSSIBLE`. Results written before a malformed frame are kept, and
/// `out` is flushed before returning.
///
/// Returns the statistics summed over all puzzles.
///
/// # Errors
///
/// Returns [`RunError`] if the input is malformed, or writing or flushing
/// fails. A malformed frame is reported ahead of a failed flush.
pub fn solve_stream<R, W>(
    input: R,
    out: &mut W,
    options: SolveOptions,
) -> Result<SolverStats, RunError>
where
    R: BufRead,
    W: Write,
{
    let result = solve_frames(input, out, options);
    let flushed = out.flush();
    let stats = result?;
    flushed?;
    Ok(stats)
}

fn solve_frames<R, W>(input: R, out: &mut W, options: SolveOptions) -> Result<SolverStats, RunError>
where
    R: BufRead,
    W: Write,
{
    let solver = BacktrackSolver::new();
    let mut total = SolverStats::default();
    for (index, grid) in PuzzleReader::new(input).enumerate() {
        let mut search = SearchGrid::new(grid?);
        let (solved, stats) = solver.solve(&mut search);
        total += stats;
        log::info!(
            "puzzle {}: {}x{} {} after {} calls",
            index + 1,
            search.grid().width(),
            search.grid().height(),
            if solved { "solved" } else { "impossible" },
            stats.calls(),
        );

        if options.calls_only {
            continue;
        }
        if solved {
            out.write_all(options.renderer.render(&search).as_bytes())?;
        } else {
            writeln!(out, "IMPOSSIBLE")?;
        }
        if options.calls {
            writeln!(out, "Called {} times", stats.calls())?;
        }
        writeln!(out)?;
    }
    if options.calls_only {
        writeln!(out, "Called {} times", total.calls())?;
    }
    Ok(total)
}

/// Generates a puzzle and writes it as a stream frame.
///
/// The seed goes first as a `#` comment, so the output can be fed back to
/// the solver. With `solution`, the solution frame follows after a blank
/// line. `out` is flushed before returning.
///
/// # Errors
///
/// Returns [`RunError`] if the size cannot be generated, or writing or
/// flushing fails.
pub fn generate<W>(
    size: BoardSize,
    seed: Option<PuzzleSeed>,
    solution: bool,
    out: &mut W,
) -> Result<GeneratedPuzzle, RunError>
where
    W: Write,
{
    let generator = PuzzleGenerator::new();
    let seed = seed.unwrap_or_else(PuzzleSeed::random);
    let puzzle = generator.generate_with_seed(size.width, size.height, seed)?;
    log::info!(
        "generated {}x{} puzzle with {} flows from seed {}",
        size.width,
        size.height,
        puzzle.flows(),
        puzzle.seed
    );

    writeln!(out, "# seed {}", puzzle.seed)?;
    write_frame(out, &puzzle, &puzzle.puzzle)?;
    if solution {
        writeln!(out)?;
        write_frame(out, &puzzle, &puzzle.solution)?;
    }
    out.flush()?;
    Ok(puzzle)
}

fn write_frame<W>(out: &mut W, puzzle: &GeneratedPuzzle, rows: &[String]) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "{} {}", puzzle.width, puzzle.height)?;
    for row in rows {
        writeln!(out, "{row}")?;
    }
    Ok(())
}
