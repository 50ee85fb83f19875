//! Random puzzle generation for Numberlink.
//!
//! # Overview
//!
//! [`PuzzleGenerator`] builds a puzzle in four steps:
//!
//! 1. cover the board with dominoes and mix the tiling by rotating pairs of
//!    parallel dominoes;
//! 2. merge the single cell left over on odd boards into a neighboring domino;
//! 3. join regions end to end into long flows, never letting a flow run
//!    alongside itself;
//! 4. number the flows with [`compact_regions`] and label them from
//!    [`LABELS`].
//!
//! Generation is driven by a [`PuzzleSeed`], so any puzzle can be reproduced
//! from its seed and size.
//!
//! # Examples
//!
//! ```
//! use numberlink_generator::{PuzzleGenerator, PuzzleSeed};
//!
//! let seed: PuzzleSeed = "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef"
//!     .parse()
//!     .unwrap();
//! let puzzle = PuzzleGenerator::new().generate_with_seed(6, 6, seed)?;
//! assert_eq!(puzzle.puzzle.len(), 6);
//! assert_eq!(puzzle.solution.len(), 6);
//! # Ok::<(), numberlink_generator::GeneratorError>(())
//! ```

pub use self::{
    alphabet::{LABELS, label},
    compact::compact_regions,
    error::*,
    generator::{GeneratedPuzzle, PuzzleGenerator},
    seed::{PuzzleSeed, SeedParseError},
};

mod alphabet;
mod carve;
mod compact;
mod error;
mod generator;
mod layout;
mod seed;
mod tiling;
