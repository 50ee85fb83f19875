use numberlink_core::{ConfigurationError, EMPTY_CHAR, Grid};

use crate::{
    GeneratorError, LABELS, PuzzleSeed, carve, compact::compact_regions, label,
    layout::FlowLayout, tiling,
};

/// A generated puzzle with its solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// The seed that reproduces this puzzle.
    pub seed: PuzzleSeed,
    /// Board width.
    pub width: usize,
    /// Board height.
    pub height: usize,
    /// Puzzle rows: flow ends are labeled, every other cell is empty.
    pub puzzle: Vec<String>,
    /// Solution rows: every cell shows the label of its flow.
    pub solution: Vec<String>,
}

impl GeneratedPuzzle {
    /// Parses the puzzle rows into a grid.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the rows do not match the size,
    /// which does not happen for puzzles produced by [`PuzzleGenerator`].
    pub fn puzzle_grid(&self) -> Result<Grid, ConfigurationError> {
        Grid::from_rows(self.width, self.height, &self.puzzle)
    }

    /// Returns the number of flows in the puzzle.
    #[must_use]
    pub fn flows(&self) -> usize {
        self.puzzle
            .iter()
            .flat_map(|row| row.chars())
            .filter(|&ch| ch != EMPTY_CHAR)
            .count()
            / 2
    }
}

/// Generates Numberlink puzzles.
///
/// A puzzle is built from a random domino tiling of the board: dominoes are
/// rotated in pairs to mix the tiling, then joined end to end into long
/// flows. The flows are finally numbered and their ends become the puzzle's
/// endpoints. Every flow is a simple path that never runs alongside itself,
/// and together the flows cover the whole board, so the result is always
/// solvable.
///
/// # Examples
///
/// ```
/// use numberlink_generator::PuzzleGenerator;
///
/// let generator = PuzzleGenerator::new();
/// let puzzle = generator.generate(5, 5)?;
///
/// println!("Seed: {}", puzzle.seed);
/// for row in &puzzle.puzzle {
///     println!("{row}");
/// }
///
/// let again = generator.generate_with_seed(5, 5, puzzle.seed)?;
/// assert_eq!(again, puzzle);
/// # Ok::<(), numberlink_generator::GeneratorError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct PuzzleGenerator;

impl PuzzleGenerator {
    /// Creates a new puzzle generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Generates a puzzle from a fresh random seed.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] if the board is degenerate or has more flows
    /// than available labels.
    pub fn generate(&self, width: usize, height: usize) -> Result<GeneratedPuzzle, GeneratorError> {
        self.generate_with_seed(width, height, PuzzleSeed::random())
    }

    /// Generates the puzzle determined by `seed`.
    ///
    /// The same seed and size always produce the same puzzle.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Sizing`] if a dimension is zero, the board
    /// is a single cell, or the board is too large to count its shuffle
    /// steps, and [`GeneratorError::LabelCapacity`] if the puzzle
    /// would need more labels than [`LABELS`] provides.
    pub fn generate_with_seed(
        &self,
        width: usize,
        height: usize,
        seed: PuzzleSeed,
    ) -> Result<GeneratedPuzzle, GeneratorError> {
        // The shuffle rotates `cells * cells` blocks; at least two cells are needed.
        let shuffle_steps = width
            .checked_mul(height)
            .and_then(|cells| cells.checked_mul(cells));
        if shuffle_steps.is_none_or(|steps| steps < 4) {
            return Err(GeneratorError::Sizing { width, height });
        }

        let mut rng = seed.rng(width, height);
        let mut layout = tiling::tile(width, height);
        tiling::shuffle(&mut layout, &mut rng);
        tiling::absorb_odd_corner(&mut layout);
        let joins = carve::carve(&mut layout, &mut rng);
        let flows = compact_regions(width, layout.regions_mut());
        log::debug!("generated {width}x{height} layout with {flows} flows after {joins} joins");

        let (puzzle, solution) = render(&layout, flows)?;
        Ok(GeneratedPuzzle {
            seed,
            width,
            height,
            puzzle,
            solution,
        })
    }
}

/// Renders puzzle and solution rows of a compacted layout.
fn render(layout: &FlowLayout, flows: usize) -> Result<(Vec<String>, Vec<String>), GeneratorError> {
    if flows > LABELS.len() {
        return Err(GeneratorError::LabelCapacity {
            flows,
            capacity: LABELS.len(),
        });
    }

    let width = layout.width();
    let mut puzzle = Vec::with_capacity(layout.height());
    let mut solution = Vec::with_capacity(layout.height());
    for row in 0..layout.height() {
        let mut puzzle_row = String::with_capacity(width);
        let mut solution_row = String::with_capacity(width);
        for cell in row * width..(row + 1) * width {
            let ch = label(layout.region(cell)).ok_or(GeneratorError::LabelCapacity {
                flows,
                capacity: LABELS.len(),
            })?;
            solution_row.push(ch);
            puzzle_row.push(if layout.is_head(cell) { ch } else { EMPTY_CHAR });
        }
        puzzle.push(puzzle_row);
        solution.push(solution_row);
    }
    Ok((puzzle, solution))
}
