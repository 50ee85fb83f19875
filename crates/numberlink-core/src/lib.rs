//! Core data structures for Numberlink puzzles.
//!
//! This crate provides the shared vocabulary of the solver and the generator:
//!
//! - [`grid`]: the padded puzzle [`Grid`], its text form, and index arithmetic
//!   for neighbor lookups without bounds checks.
//! - [`cell`]: [`CellContent`] (border, empty, endpoint) and interior
//!   [`Position`]s.
//! - [`direction`]: the four compass [`Direction`]s and the [`Directions`]
//!   connection mask.
//! - [`journal`]: the [`UndoJournal`] used for cheap backtracking.
//!
//! # Examples
//!
//! ```
//! use numberlink_core::{CellContent, Grid, Position};
//!
//! let grid = Grid::from_rows(4, 1, &["A..A"])?;
//! assert_eq!(
//!     grid.content(grid.index(Position::new(3, 0))),
//!     CellContent::Endpoint('A')
//! );
//! # Ok::<(), numberlink_core::ConfigurationError>(())
//! ```

pub mod cell;
pub mod direction;
pub mod grid;
pub mod journal;

pub use self::{
    cell::{BORDER_CHAR, CellContent, EMPTY_CHAR, Position},
    direction::{Direction, Directions},
    error::*,
    grid::{Corner, Grid},
    journal::{Checkpoint, UndoJournal},
};

mod error;
