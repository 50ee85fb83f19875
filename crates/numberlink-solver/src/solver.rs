use std::ops::AddAssign;

use numberlink_core::{Checkpoint, Directions, Grid};

use crate::{SearchGrid, validator};

/// Statistics collected during one solve attempt.
///
/// # Examples
///
/// ```
/// use numberlink_solver::{BacktrackSolver, SearchGrid};
///
/// let mut grid = SearchGrid::new("A..A".parse()?);
/// let (solved, stats) = BacktrackSolver::new().solve(&mut grid);
/// assert!(solved);
/// assert!(stats.calls() >= 4);
/// # Ok::<(), numberlink_core::ConfigurationError>(())
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SolverStats {
    calls: u64,
    backtracks: u64,
    rejected: u64,
}

impl SolverStats {
    /// Returns how many times the search decided a cell.
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Returns how many tentative connections were rolled back.
    #[must_use]
    pub fn backtracks(&self) -> u64 {
        self.backtracks
    }

    /// Returns how many complete layouts the validator rejected.
    #[must_use]
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}

impl AddAssign for SolverStats {
    fn add_assign(&mut self, other: Self) {
        self.calls += other.calls;
        self.backtracks += other.backtracks;
        self.rejected += other.rejected;
    }
}

/// An exact depth-first solver.
///
/// Cells are decided one at a time in [`ScanOrder`](crate::ScanOrder). By the
/// time a cell is decided its north and west connections are already fixed,
/// so only its east and south connections remain to choose, and most choices
/// are ruled out by looking at the already decided cells around it. Every
/// tentative connection is journaled in the [`SearchGrid`] and rolled back when
/// the branch fails. Complete layouts are confirmed by
/// [`validate`](crate::validate), which catches the cases the local checks let
/// through.
///
/// # Examples
///
/// ```
/// use numberlink_core::Grid;
/// use numberlink_solver::{BacktrackSolver, SearchGrid};
///
/// let grid = Grid::from_rows(3, 2, &["A.A", "B.B"])?;
/// let mut search = SearchGrid::new(grid);
/// let (solved, _stats) = BacktrackSolver::new().solve(&mut search);
/// assert!(solved);
/// assert_eq!(search.solution_rows(), ["AAA", "BBB"]);
/// # Ok::<(), numberlink_core::ConfigurationError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacktrackSolver {
    prune_tight_corners: bool,
}

impl Default for BacktrackSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BacktrackSolver {
    /// Creates a solver with every pruning rule enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prune_tight_corners: true,
        }
    }

    /// Enables or disables rejecting connections that form two facing corners.
    ///
    /// Disabling the rule never changes whether a grid is solvable, only how
    /// much of the search tree is explored.
    #[must_use]
    pub fn with_tight_corner_pruning(mut self, enabled: bool) -> Self {
        self.prune_tight_corners = enabled;
        self
    }

    /// Returns `true` if tight-corner pruning is enabled.
    #[must_use]
    pub fn prunes_tight_corners(&self) -> bool {
        self.prune_tight_corners
    }

    /// Searches for a solution of `grid`.
    ///
    /// Any connections already present are discarded first. On success the
    /// grid keeps the solution's connections; otherwise it is left without
    /// connections.
    ///
    /// Returns whether a solution was found, together with the statistics of
    /// this attempt.
    pub fn solve(&self, grid: &mut SearchGrid) -> (bool, SolverStats) {
        let mut stats = SolverStats::default();
        let solved = self.solve_with_stats(grid, &mut stats);
        (solved, stats)
    }

    /// Searches for a solution, accumulating into existing statistics.
    ///
    /// This is useful to total the statistics of many puzzles.
    pub fn solve_with_stats(&self, grid: &mut SearchGrid, stats: &mut SolverStats) -> bool {
        grid.reset();
        let before = *stats;
        let first = grid.scan().first();
        let mut cx = SolveContext {
            grid,
            stats,
            prune_tight_corners: self.prune_tight_corners,
        };
        let solved = cx.search(first);
        log::debug!(
            "{}x{} grid {}: {} calls, {} backtracks, {} rejected",
            cx.grid.grid().width(),
            cx.grid.grid().height(),
            if solved { "solved" } else { "unsolvable" },
            cx.stats.calls - before.calls,
            cx.stats.backtracks - before.backtracks,
            cx.stats.rejected - before.rejected,
        );
        debug_assert!(cx.grid.is_mirror_consistent());
        solved
    }

    /// Solves `grid` in a fresh search state.
    ///
    /// Returns the solved search state, or `None` if the grid has no solution.
    #[must_use]
    pub fn solve_grid(&self, grid: Grid) -> Option<SearchGrid> {
        let mut search = SearchGrid::new(grid);
        let (solved, _) = self.solve(&mut search);
        solved.then_some(search)
    }
}

/// One way to settle a cell before moving on to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    /// The cell is already settled by its north and west neighbors.
    Advance,
    /// Connect the cell in these directions.
    Connect(Directions),
}

/// A cell being decided, with the moves not yet tried.
#[derive(Debug)]
struct Frame {
    cell: usize,
    checkpoint: Checkpoint,
    moves: [Option<Move>; 2],
    next: usize,
    /// The move whose subtree is being explored, and the state before it.
    trying: Option<(Move, Checkpoint)>,
}

impl Frame {
    fn next_move(&mut self) -> Option<Move> {
        while let Some(slot) = self.moves.get(self.next) {
            self.next += 1;
            if slot.is_some() {
                return *slot;
            }
        }
        None
    }
}

struct SolveContext<'a> {
    grid: &'a mut SearchGrid,
    stats: &'a mut SolverStats,
    prune_tight_corners: bool,
}

impl SolveContext<'_> {
    /// Depth-first search from `first` to the last cell in scan order.
    ///
    /// The path of cells being decided lives in an explicit stack of frames,
    /// so the depth of the search is bounded by memory, not by the call stack.
    fn search(&mut self, first: usize) -> bool {
        let last = self.grid.scan().last();
        let mut stack = Vec::<Frame>::new();
        let mut cell = first;
        loop {
            self.stats.calls += 1;
            if cell == last {
                if validator::validate(self.grid) {
                    return true;
                }
                self.stats.rejected += 1;
            } else {
                stack.push(Frame {
                    cell,
                    checkpoint: self.grid.checkpoint(),
                    moves: self.moves(cell),
                    next: 0,
                    trying: None,
                });
            }

            let Some(next) = self.backtrack(&mut stack) else {
                return false;
            };
            cell = next;
        }
    }

    /// Undoes the failed move of the innermost frame and applies the next
    /// move that can be made, popping exhausted frames.
    ///
    /// Returns the cell to decide next, or `None` once every frame is
    /// exhausted.
    fn backtrack(&mut self, stack: &mut Vec<Frame>) -> Option<usize> {
        loop {
            let frame = stack.last_mut()?;
            if let Some((failed, checkpoint)) = frame.trying.take() {
                if let Move::Connect(_) = failed {
                    self.stats.backtracks += 1;
                }
                self.grid.rollback(checkpoint);
            }

            let Some(next) = frame.next_move() else {
                self.grid.rollback(frame.checkpoint);
                stack.pop();
                continue;
            };
            let checkpoint = self.grid.checkpoint();
            let applied = match next {
                Move::Advance => true,
                Move::Connect(directions) => {
                    self.grid
                        .connect_all(frame.cell, directions, self.prune_tight_corners)
                }
            };
            if !applied {
                self.stats.backtracks += 1;
                self.grid.rollback(checkpoint);
                continue;
            }
            frame.trying = Some((next, checkpoint));
            return Some(self.grid.scan().next(frame.cell));
        }
    }

    /// Lists the moves worth trying at `cell`, in order.
    ///
    /// Every check only reads cells decided before `cell`, which are the same
    /// whenever `cell` is decided, so the list is fixed for the frame.
    fn moves(&self, cell: usize) -> [Option<Move>; 2] {
        let mask = self.grid.connections_at(cell);
        let ne = self.grid.connections_at(self.grid.step(cell, Directions::NORTH_EAST));
        let nw = self.grid.connections_at(self.grid.step(cell, Directions::NORTH_WEST));
        let connect = |allowed: bool, directions| allowed.then_some(Move::Connect(directions));

        if self.grid.grid().is_source(cell) {
            if mask.is_empty() {
                return [
                    connect(ne != Directions::SOUTH_WEST, Directions::EAST),
                    connect(self.implicit_turn_allowed(cell), Directions::SOUTH),
                ];
            }
            if mask == Directions::NORTH || mask == Directions::WEST {
                return [Some(Move::Advance), None];
            }
            return [None, None];
        }

        if mask.is_empty() {
            return [
                connect(
                    self.grid.pivots().allows_south_east(cell),
                    Directions::SOUTH_EAST,
                ),
                None,
            ];
        }
        if mask == Directions::WEST {
            return [
                connect(
                    self.grid.pivots().allows_south_west(cell)
                        && self.south_west_lane_clear(cell)
                        && self.implicit_turn_allowed(cell),
                    Directions::SOUTH,
                ),
                connect(
                    ne != Directions::SOUTH_WEST && nw != Directions::SOUTH_EAST,
                    Directions::EAST,
                ),
            ];
        }
        if mask == Directions::NORTH_WEST {
            let nw_cell = self.grid.step(cell, Directions::NORTH_WEST);
            let closed = nw == Directions::NORTH_WEST || self.grid.grid().is_source(nw_cell);
            return [closed.then_some(Move::Advance), None];
        }
        if mask == Directions::NORTH {
            let ne_cell = self.grid.step(cell, Directions::NORTH_EAST);
            let ne_turns_away = ne == Directions::NORTH_EAST
                || (self.grid.grid().is_source(ne_cell) && ne.intersects(Directions::NORTH_EAST));
            return [
                connect(ne_turns_away, Directions::EAST),
                connect(
                    ne != Directions::SOUTH_WEST
                        && nw != Directions::SOUTH_EAST
                        && self.implicit_turn_allowed(cell),
                    Directions::SOUTH,
                ),
            ];
        }
        [None, None]
    }

    /// A flow turning south at `cell` leaves the east neighbor to be entered
    /// from elsewhere.
    fn implicit_turn_allowed(&self, cell: usize) -> bool {
        let east = self.grid.step(cell, Directions::EAST);
        !self.grid.connections_at(east).is_empty()
            || self.grid.pivots().allows_south_east(east)
            || !self.grid.grid().content(east).is_empty()
    }

    /// Every cell south-west of `cell` up to the next endpoint must be a
    /// westward flow end.
    fn south_west_lane_clear(&self, cell: usize) -> bool {
        let mut cell = cell;
        while !self.grid.grid().is_source(cell) {
            if self.grid.connections_at(cell) != Directions::WEST {
                return false;
            }
            cell = self.grid.step(cell, Directions::SOUTH_WEST);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use numberlink_core::{CellContent, Position};

    use super::*;
    use crate::testing::SolveTester;

    #[test]
    fn test_straight_line() {
        SolveTester::from_str("A..A")
            .solve()
            .assert_solved()
            .assert_rows(["AAAA"])
            .assert_connections(Position::new(0, 0), Directions::EAST)
            .assert_connections(Position::new(1, 0), Directions::EAST | Directions::WEST)
            .assert_connections(Position::new(3, 0), Directions::WEST);
    }

    #[test]
    fn test_adjacent_pairs() {
        SolveTester::from_str("AA\nBB")
            .solve()
            .assert_solved()
            .assert_rows(["AA", "BB"]);
        SolveTester::from_str("AB\nAB")
            .solve()
            .assert_solved()
            .assert_rows(["AB", "AB"]);
    }

    #[test]
    fn test_crossing_is_unsolvable() {
        SolveTester::from_str("AB\nBA").solve().assert_unsolved();
    }

    #[test]
    fn test_uncovered_cells_are_unsolvable() {
        SolveTester::from_str("AA.").solve().assert_unsolved();
        // The only covering path would run alongside itself.
        SolveTester::from_str("A.\n..\n.A").solve().assert_unsolved();
        SolveTester::from_str(".").solve().assert_unsolved();
        SolveTester::from_str("A").solve().assert_unsolved();
    }

    #[test]
    fn test_mismatched_labels_are_unsolvable() {
        SolveTester::from_str("A..B").solve().assert_unsolved();
        SolveTester::from_str("A...").solve().assert_unsolved();
        SolveTester::from_str("AAA.").solve().assert_unsolved();
    }

    #[test]
    fn test_larger_puzzle() {
        SolveTester::from_str(
            "
            A...B
            .C..D
            .E.B.
            ..AD.
            C...E
            ",
        )
        .solve()
        .assert_solved()
        .assert_valid()
        .assert_endpoints_kept();
    }

    #[test]
    fn test_pruning_does_not_change_result() {
        for text in ["A..A", "AB\nBA", "A.A\nB.B", "A.\n..\n.A", "A...B\n.C..D\n.E.B.\n..AD.\nC...E"] {
            let with = SolveTester::from_str(text).solve();
            let without = SolveTester::from_str(text)
                .with_solver(BacktrackSolver::new().with_tight_corner_pruning(false))
                .solve();
            assert_eq!(with.is_solved(), without.is_solved(), "{text}");
        }
    }

    #[test]
    fn test_resolve_resets_previous_state() {
        let solver = BacktrackSolver::new();
        let mut search = SearchGrid::new("A.A\nB.B".parse().unwrap());
        let (first, first_stats) = solver.solve(&mut search);
        let (second, second_stats) = solver.solve(&mut search);
        assert!(first && second);
        assert_eq!(first_stats, second_stats);
        assert_eq!(search.solution_rows(), ["AAA", "BBB"]);
    }

    #[test]
    fn test_failure_leaves_no_connections() {
        let mut search = SearchGrid::new("AB\nBA".parse().unwrap());
        let (solved, stats) = BacktrackSolver::new().solve(&mut search);
        assert!(!solved);
        assert!(stats.calls() > 0);
        assert!(search.is_mirror_consistent());
        let grid = search.grid().clone();
        assert!(grid.cells().all(|c| search.connections_at(c).is_empty()));
    }

    #[test]
    fn test_stats_accumulate() {
        let solver = BacktrackSolver::new();
        let mut stats = SolverStats::default();
        let mut a = SearchGrid::new("A..A".parse().unwrap());
        let mut b = SearchGrid::new("AB\nBA".parse().unwrap());
        assert!(solver.solve_with_stats(&mut a, &mut stats));
        let after_first = stats.calls();
        assert!(!solver.solve_with_stats(&mut b, &mut stats));
        assert!(stats.calls() > after_first);
        assert_eq!(solver.solve(&mut b).1.calls(), stats.calls() - after_first);

        let mut summed = solver.solve(&mut a).1;
        summed += solver.solve(&mut b).1;
        assert_eq!(summed, stats);
    }

    /// Counts the placements of one `A` pair and one `B` pair that solve.
    fn count_solvable(width: usize, height: usize) -> usize {
        let n = width * height;
        let solver = BacktrackSolver::new();
        let mut count = 0;
        for a1 in 0..n {
            for a2 in a1 + 1..n {
                for b1 in 0..n {
                    for b2 in b1 + 1..n {
                        if [b1, b2].iter().any(|b| *b == a1 || *b == a2) {
                            continue;
                        }
                        let mut content = vec![CellContent::Empty; n];
                        content[a1] = CellContent::Endpoint('A');
                        content[a2] = CellContent::Endpoint('A');
                        content[b1] = CellContent::Endpoint('B');
                        content[b2] = CellContent::Endpoint('B');
                        let grid = Grid::new(width, height, content).unwrap();
                        if solver.solve_grid(grid).is_some() {
                            count += 1;
                        }
                    }
                }
            }
        }
        count
    }

    #[track_caller]
    fn assert_count(width: usize, height: usize, expected: usize) {
        assert_eq!(count_solvable(width, height), expected, "{width}x{height}");
        if width != height {
            assert_eq!(count_solvable(height, width), expected, "{height}x{width}");
        }
    }

    #[test]
    fn test_exhaustive_tiny_boards() {
        assert_count(1, 4, 2);
        assert_count(1, 5, 4);
        assert_count(2, 1, 0);
        assert_count(2, 2, 4);
        assert_count(2, 3, 14);
        assert_count(2, 4, 18);
        assert_count(2, 5, 18);
    }

    #[test]
    fn test_exhaustive_three_row_boards() {
        assert_count(3, 3, 24);
        assert_count(3, 4, 32);
        assert_count(3, 5, 36);
    }

    #[test]
    fn test_exhaustive_four_row_boards() {
        assert_count(4, 4, 24);
        assert_count(4, 5, 44);
    }

    #[test]
    fn test_exhaustive_larger_boards() {
        assert_count(4, 6, 44);
        assert_count(5, 5, 48);
    }

    #[test]
    fn test_wide_board_does_not_exhaust_the_stack() {
        let width = 50_000;
        let mut content = vec![CellContent::Empty; width * 2];
        for (row, label) in [(0, 'A'), (1, 'B')] {
            content[row * width] = CellContent::Endpoint(label);
            content[row * width + width - 1] = CellContent::Endpoint(label);
        }
        let grid = Grid::new(width, 2, content).unwrap();

        let mut search = SearchGrid::new(grid);
        let (solved, stats) = BacktrackSolver::new().solve(&mut search);
        assert!(solved);
        assert!(stats.calls() >= 2 * width as u64);
        assert_eq!(
            search.solution_rows(),
            ["A".repeat(width), "B".repeat(width)]
        );
        assert_eq!(crate::check(&search), Ok(()));
    }
}
