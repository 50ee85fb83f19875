//! Test utilities for the solver.
//!
//! This module provides [`SolveTester`], a harness that solves a puzzle given
//! in text form and checks the result with chained assertions:
//!
//! ```text
//! SolveTester::from_str("A..A")
//!     .solve()
//!     .assert_solved()
//!     .assert_rows(["AAAA"]);
//! ```

use numberlink_core::{Directions, Grid, Position};

use crate::{BacktrackSolver, SearchGrid, SolverStats, validator};

/// A test harness for solving a single puzzle.
///
/// # Method Chaining
///
/// All methods return `self`, enabling fluent method chaining for readable tests.
///
/// # Panics
///
/// All assertion methods panic with detailed messages on failure, using
/// `#[track_caller]` to report the correct source location.
#[derive(Debug)]
pub struct SolveTester {
    initial: Grid,
    search: SearchGrid,
    solver: BacktrackSolver,
    outcome: Option<(bool, SolverStats)>,
}

impl SolveTester {
    /// Creates a new tester for a grid.
    pub fn new(grid: Grid) -> Self {
        Self {
            search: SearchGrid::new(grid.clone()),
            initial: grid,
            solver: BacktrackSolver::new(),
            outcome: None,
        }
    }

    /// Creates a new tester from the text form of a grid.
    ///
    /// Surrounding whitespace of every line is ignored, so puzzles can be
    /// written as indented raw strings.
    ///
    /// # Panics
    ///
    /// Panics if the string cannot be parsed as a valid grid.
    #[track_caller]
    pub fn from_str(s: &str) -> Self {
        let grid = s.parse().unwrap();
        Self::new(grid)
    }

    /// Replaces the solver used by [`solve`](Self::solve).
    #[must_use]
    pub fn with_solver(mut self, solver: BacktrackSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Runs the solver and records the outcome.
    ///
    /// # Panics
    ///
    /// Panics if the mirror invariant is broken afterwards.
    #[track_caller]
    pub fn solve(mut self) -> Self {
        let outcome = self.solver.solve(&mut self.search);
        assert!(
            self.search.is_mirror_consistent(),
            "Expected connections to stay mirrored after solving:\n{}",
            self.initial
        );
        self.outcome = Some(outcome);
        self
    }

    /// Returns `true` if the last [`solve`](Self::solve) found a solution.
    ///
    /// # Panics
    ///
    /// Panics if the puzzle has not been solved yet.
    #[track_caller]
    pub fn is_solved(&self) -> bool {
        self.outcome().0
    }

    #[track_caller]
    fn outcome(&self) -> (bool, SolverStats) {
        self.outcome
            .expect("Expected solve() to be called before inspecting the outcome")
    }

    /// Asserts that a solution was found.
    ///
    /// # Panics
    ///
    /// Panics if the solver reported the puzzle unsolvable.
    #[track_caller]
    pub fn assert_solved(self) -> Self {
        let (solved, stats) = self.outcome();
        assert!(
            solved,
            "Expected a solution for\n{}\nbut none was found after {} calls",
            self.initial,
            stats.calls()
        );
        self
    }

    /// Asserts that no solution was found.
    ///
    /// # Panics
    ///
    /// Panics if the solver found a solution.
    #[track_caller]
    pub fn assert_unsolved(self) -> Self {
        let (solved, _) = self.outcome();
        assert!(
            !solved,
            "Expected\n{}\nto be unsolvable, but found:\n{}",
            self.initial,
            self.search.solution_rows().join("\n")
        );
        self
    }

    /// Asserts the labels of the solution, row by row.
    ///
    /// # Panics
    ///
    /// Panics if the solution differs.
    #[track_caller]
    pub fn assert_rows<const N: usize>(self, rows: [&str; N]) -> Self {
        let actual = self.search.solution_rows();
        assert_eq!(
            actual, rows,
            "Expected solution rows {rows:?} for\n{}",
            self.initial
        );
        self
    }

    /// Asserts the connections of a single cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell connects in other directions.
    #[track_caller]
    pub fn assert_connections(self, pos: Position, expected: Directions) -> Self {
        let actual = self.search.connections(pos);
        assert_eq!(
            actual, expected,
            "Expected {pos} to connect {expected:?}, but it connects {actual:?}"
        );
        self
    }

    /// Asserts that the current connections pass the validator.
    ///
    /// # Panics
    ///
    /// Panics with the violation if the connections are not a solution.
    #[track_caller]
    pub fn assert_valid(self) -> Self {
        if let Err(violation) = validator::check(&self.search) {
            panic!(
                "Expected a valid solution, but {violation}:\n{}",
                self.search.solution_rows().join("\n")
            );
        }
        self
    }

    /// Asserts that every endpoint keeps its label in the solution.
    ///
    /// # Panics
    ///
    /// Panics if an endpoint cell shows another label.
    #[track_caller]
    pub fn assert_endpoints_kept(self) -> Self {
        let rows = self.search.solution_rows();
        for (initial, solved) in self.initial.rows().iter().zip(&rows) {
            for (expected, actual) in initial.chars().zip(solved.chars()) {
                if expected != numberlink_core::EMPTY_CHAR {
                    assert_eq!(
                        actual, expected,
                        "Expected endpoint {expected} to be kept in\n{}",
                        rows.join("\n")
                    );
                }
            }
        }
        self
    }
}
