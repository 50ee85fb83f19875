//! Exact backtracking solver for Numberlink puzzles.
//!
//! # Overview
//!
//! - [`SearchGrid`]: the mutable search state built from a
//!   [`Grid`](numberlink_core::Grid), with journaled connections.
//! - [`BacktrackSolver`]: depth-first search over the cells in [`ScanOrder`],
//!   pruned by local checks and the [`PivotTables`].
//! - [`check`] / [`validate`]: the global solution check run on every complete
//!   layout.
//!
//! # Examples
//!
//! ```
//! use numberlink_core::Grid;
//! use numberlink_solver::{BacktrackSolver, SearchGrid};
//!
//! let grid = Grid::from_rows(2, 2, &["AA", "BB"])?;
//! let mut search = SearchGrid::new(grid);
//!
//! let (solved, stats) = BacktrackSolver::new().solve(&mut search);
//! assert!(solved);
//! assert_eq!(search.solution_rows(), ["AA", "BB"]);
//! println!("decided {} cells", stats.calls());
//! # Ok::<(), numberlink_core::ConfigurationError>(())
//! ```

pub use self::{
    pivot::PivotTables,
    scan::ScanOrder,
    search_grid::SearchGrid,
    solver::{BacktrackSolver, SolverStats},
    validator::{Violation, check, validate},
};

mod pivot;
mod scan;
mod search_grid;
mod solver;
mod validator;

#[cfg(test)]
mod testing;
