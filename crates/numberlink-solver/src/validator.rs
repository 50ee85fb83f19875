use derive_more::{Display, Error};
use numberlink_core::{Direction, Directions, Position};

use crate::SearchGrid;

/// Why a layout of connections is not a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum Violation {
    /// The last cell in scan order is not fully connected.
    #[display("terminal cell {cell} is not covered")]
    UncoveredTerminal {
        /// The terminal cell.
        cell: Position,
    },
    /// A cell is not part of any flow.
    #[display("cell {cell} does not belong to a flow")]
    Uncovered {
        /// The uncovered cell.
        cell: Position,
    },
    /// A flow stops before reaching a second endpoint.
    #[display("flow {label} dead-ends at {cell}")]
    DeadEnd {
        /// The label of the flow.
        label: char,
        /// The cell where the flow stops.
        cell: Position,
    },
    /// A flow splits into more than one onward path.
    #[display("flow {label} branches at {cell}")]
    Branch {
        /// The label of the flow.
        label: char,
        /// The branching cell.
        cell: Position,
    },
    /// A flow runs into a cell that was already walked.
    #[display("flow {label} revisits {cell}")]
    Revisit {
        /// The label of the flow.
        label: char,
        /// The revisited cell.
        cell: Position,
    },
    /// Two cells of one flow are adjacent without being connected.
    #[display("flow {label} touches itself at {cell}")]
    SelfTouch {
        /// The label of the flow.
        label: char,
        /// The cell being walked when the touch was found.
        cell: Position,
    },
    /// A flow ends at an endpoint of a different label.
    #[display("flow {label} ends at endpoint {found} at {cell}")]
    WrongEndpoint {
        /// The label of the flow.
        label: char,
        /// The label of the endpoint reached.
        found: char,
        /// The endpoint reached.
        cell: Position,
    },
}

/// Returns `true` if the connections of `grid` form a complete solution.
///
/// See [`check`] for the rules.
#[must_use]
pub fn validate(grid: &SearchGrid) -> bool {
    check(grid).is_ok()
}

/// Checks that the connections of `grid` form a complete solution.
///
/// A solution connects every endpoint to the other endpoint of its label by a
/// single path, covers every interior cell, and never runs a flow alongside
/// itself: two cells of the same flow may only be adjacent if they are
/// connected.
///
/// # Errors
///
/// Returns the first [`Violation`] found.
///
/// # Examples
///
/// ```
/// use numberlink_solver::{BacktrackSolver, SearchGrid, Violation, check};
///
/// let mut grid = SearchGrid::new("A..A".parse()?);
/// assert!(matches!(check(&grid), Err(Violation::UncoveredTerminal { .. })));
///
/// let (solved, _) = BacktrackSolver::new().solve(&mut grid);
/// assert!(solved);
/// assert_eq!(check(&grid), Ok(()));
/// # Ok::<(), numberlink_core::ConfigurationError>(())
/// ```
pub fn check(grid: &SearchGrid) -> Result<(), Violation> {
    let board = grid.grid();
    let position = |cell: usize| board.position(cell).unwrap_or_default();

    let last = grid.scan().last();
    let required = if board.is_source(last) { 1 } else { 2 };
    if grid.connections_at(last).bits().count_ones() != required {
        return Err(Violation::UncoveredTerminal {
            cell: position(last),
        });
    }

    let mut marks: Vec<Option<char>> = vec![None; board.len()];
    for source in board.sources() {
        if marks[source].is_some() {
            continue;
        }
        let Some(label) = board.label(source) else {
            unreachable!("sources always carry a label");
        };

        let mut cell = source;
        let mut arrived = Directions::empty();
        loop {
            marks[cell] = Some(label);
            let mask = grid.connections_at(cell);
            for dir in Direction::ALL {
                if mask.contains(dir.bit()) {
                    continue;
                }
                if marks[grid.step(cell, dir.bit())] == Some(label) {
                    return Err(Violation::SelfTouch {
                        label,
                        cell: position(cell),
                    });
                }
            }

            let onward = mask - arrived;
            if cell != source && board.is_source(cell) {
                if !onward.is_empty() {
                    return Err(Violation::Branch {
                        label,
                        cell: position(cell),
                    });
                }
                match board.label(cell) {
                    Some(found) if found != label => {
                        return Err(Violation::WrongEndpoint {
                            label,
                            found,
                            cell: position(cell),
                        });
                    }
                    _ => break,
                }
            }

            let mut dirs = onward.directions();
            let (Some(dir), None) = (dirs.next(), dirs.next()) else {
                if onward.is_empty() {
                    return Err(Violation::DeadEnd {
                        label,
                        cell: position(cell),
                    });
                }
                return Err(Violation::Branch {
                    label,
                    cell: position(cell),
                });
            };

            let next = grid.step(cell, dir.bit());
            if marks[next].is_some() {
                return Err(Violation::Revisit {
                    label,
                    cell: position(next),
                });
            }
            cell = next;
            arrived = dir.opposite().bit();
        }
    }

    if let Some(cell) = board.cells().find(|&cell| marks[cell].is_none()) {
        return Err(Violation::Uncovered {
            cell: position(cell),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use numberlink_core::Grid;

    use super::*;

    fn search(text: &str) -> SearchGrid {
        SearchGrid::new(text.parse::<Grid>().unwrap())
    }

    fn at(grid: &SearchGrid, x: usize, y: usize) -> usize {
        grid.grid().index(Position::new(x, y))
    }

    #[test]
    fn test_straight_flow_is_valid() {
        let mut grid = search("A..A");
        for x in 0..3 {
            assert!(grid.connect(at(&grid, x, 0), Direction::East, true));
        }
        assert_eq!(check(&grid), Ok(()));
        assert!(validate(&grid));
    }

    #[test]
    fn test_terminal_must_be_covered() {
        let grid = search("AA\n..");
        assert_eq!(
            check(&grid),
            Err(Violation::UncoveredTerminal {
                cell: Position::new(1, 1)
            })
        );
    }

    #[test]
    fn test_self_touch_is_rejected() {
        // A U-turn: the endpoints are adjacent but not connected.
        let mut grid = search("AA\n..");
        let a0 = at(&grid, 0, 0);
        let a1 = at(&grid, 1, 0);
        assert!(grid.connect(a0, Direction::South, false));
        assert!(grid.connect(at(&grid, 0, 1), Direction::East, false));
        assert!(grid.connect(at(&grid, 1, 1), Direction::North, false));
        assert_eq!(grid.connections_at(a1), Directions::SOUTH);
        assert_eq!(
            check(&grid),
            Err(Violation::SelfTouch {
                label: 'A',
                cell: Position::new(1, 0)
            })
        );
    }

    #[test]
    fn test_dead_end_is_rejected() {
        let mut grid = search("A.A");
        assert!(grid.connect(at(&grid, 1, 0), Direction::East, true));
        assert_eq!(
            check(&grid),
            Err(Violation::DeadEnd {
                label: 'A',
                cell: Position::new(0, 0)
            })
        );
    }

    #[test]
    fn test_uncovered_cells_are_rejected() {
        let mut grid = search("A.A\n..B\n..B");
        assert!(grid.connect(at(&grid, 0, 0), Direction::East, true));
        assert!(grid.connect(at(&grid, 1, 0), Direction::East, true));
        assert!(grid.connect(at(&grid, 2, 1), Direction::South, true));
        assert_eq!(
            check(&grid),
            Err(Violation::Uncovered {
                cell: Position::new(0, 1)
            })
        );
    }

    #[test]
    fn test_violation_messages() {
        let violation = Violation::WrongEndpoint {
            label: 'A',
            found: 'B',
            cell: Position::new(2, 3),
        };
        assert_eq!(violation.to_string(), "flow A ends at endpoint B at (2, 3)");
    }
}
