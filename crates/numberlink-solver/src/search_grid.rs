use std::collections::VecDeque;

use numberlink_core::{
    Checkpoint, Direction, Directions, EMPTY_CHAR, Grid, Position, UndoJournal,
};

use crate::{PivotTables, ScanOrder};

/// A journaled write to the search state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    Connections { cell: usize, previous: Directions },
    OtherEnd { cell: usize, previous: usize },
}

/// Search state for backtracking solving.
///
/// `SearchGrid` wraps a [`Grid`] together with everything the solver derives
/// from it: the fixed [`PivotTables`] and [`ScanOrder`], and the mutable
/// per-cell connection masks and "other end" pointers. The mutable state is
/// only written through [`connect`](Self::connect), which records every
/// change in an [`UndoJournal`] so that a failed branch can be undone with
/// [`rollback`](Self::rollback).
///
/// # Design Notes
///
/// - Connection masks are kept mirrored: if a cell connects east, its east
///   neighbor connects west.
/// - `other_end` is only meaningful at the two termini of a path component,
///   where it names the opposite terminus. An isolated cell is its own other
///   end.
///
/// # Examples
///
/// ```
/// use numberlink_core::{Direction, Directions, Grid, Position};
/// use numberlink_solver::SearchGrid;
///
/// let grid: Grid = "A.A".parse()?;
/// let mut search = SearchGrid::new(grid);
/// let a = search.grid().index(Position::new(0, 0));
///
/// let checkpoint = search.checkpoint();
/// assert!(search.connect(a, Direction::East, true));
/// assert_eq!(search.connections(Position::new(1, 0)), Directions::WEST);
///
/// search.rollback(checkpoint);
/// assert!(search.connections(Position::new(1, 0)).is_empty());
/// # Ok::<(), numberlink_core::ConfigurationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SearchGrid {
    grid: Grid,
    pivots: PivotTables,
    scan: ScanOrder,
    /// Index offsets of every direction mask, indexed by its bits.
    offsets: [isize; 16],
    connections: Vec<Directions>,
    other_end: Vec<usize>,
    journal: UndoJournal<Change>,
}

impl From<Grid> for SearchGrid {
    fn from(grid: Grid) -> Self {
        Self::new(grid)
    }
}

impl SearchGrid {
    /// Builds the search state of a grid with no connections.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        let pivots = PivotTables::new(&grid);
        let scan = ScanOrder::new(&grid);
        let mut offsets = [0; 16];
        for bits in 0..16u8 {
            offsets[usize::from(bits)] = grid.offset(Directions::from_bits_retain(bits));
        }
        let len = grid.len();
        Self {
            grid,
            pivots,
            scan,
            offsets,
            connections: vec![Directions::empty(); len],
            other_end: (0..len).collect(),
            journal: UndoJournal::with_capacity(4 * len),
        }
    }

    /// Returns the underlying grid.
    #[inline]
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the pivot tables of the grid.
    #[inline]
    #[must_use]
    pub fn pivots(&self) -> &PivotTables {
        &self.pivots
    }

    /// Returns the scan order of the grid.
    #[inline]
    #[must_use]
    pub fn scan(&self) -> &ScanOrder {
        &self.scan
    }

    /// Returns the connection mask of an interior position.
    #[must_use]
    pub fn connections(&self, pos: Position) -> Directions {
        self.connections[self.grid.index(pos)]
    }

    /// Returns the connection mask of a cell by index.
    #[inline]
    #[must_use]
    pub fn connections_at(&self, cell: usize) -> Directions {
        self.connections[cell]
    }

    /// Returns the recorded other end of the component that `cell` terminates.
    #[inline]
    #[must_use]
    pub fn other_end(&self, cell: usize) -> usize {
        self.other_end[cell]
    }

    /// Returns the cell reached by the combined offset of `directions`.
    #[inline]
    #[must_use]
    pub fn step(&self, cell: usize, directions: Directions) -> usize {
        cell.wrapping_add_signed(self.offsets[usize::from(directions.bits())])
    }

    /// Returns the current journal position.
    #[inline]
    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        self.journal.checkpoint()
    }

    /// Undoes every change made since `checkpoint`.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        for change in self.journal.rollback(checkpoint) {
            match change {
                Change::Connections { cell, previous } => self.connections[cell] = previous,
                Change::OtherEnd { cell, previous } => self.other_end[cell] = previous,
            }
        }
    }

    /// Undoes every change, returning to the freshly built state.
    pub fn reset(&mut self) {
        self.rollback(Checkpoint::default());
    }

    fn set_connections(&mut self, cell: usize, value: Directions) {
        let previous = self.connections[cell];
        if previous != value {
            self.journal.record(Change::Connections { cell, previous });
            self.connections[cell] = value;
        }
    }

    fn set_other_end(&mut self, cell: usize, value: usize) {
        let previous = self.other_end[cell];
        if previous != value {
            self.journal.record(Change::OtherEnd { cell, previous });
            self.other_end[cell] = value;
        }
    }

    /// Connects `cell` with its neighbor in `direction`.
    ///
    /// Returns `false` without changing anything if the neighbor is a border
    /// cell, if the connection would close a cycle, or if it would join two
    /// components ending at endpoints with different labels. With
    /// `prune_tight_corners`, connections forming two facing corners on
    /// diagonal neighbors (a flow doubling back onto itself) are rejected as
    /// well.
    pub fn connect(&mut self, cell: usize, direction: Direction, prune_tight_corners: bool) -> bool {
        let neighbor = self.step(cell, direction.bit());
        if self.grid.is_border(neighbor) {
            return false;
        }

        let current = self.connections[cell];
        if prune_tight_corners && !current.is_empty() {
            let facing = self.connections[self.step(cell, current)];
            let turn = current | direction.bit();
            if facing.is_corner() && turn.is_corner() && facing.intersects(turn) {
                return false;
            }
        }

        let end1 = self.other_end[cell];
        let end2 = self.other_end[neighbor];
        if end1 == neighbor && end2 == cell {
            return false;
        }
        if let (Some(a), Some(b)) = (self.grid.label(end1), self.grid.label(end2))
            && a != b
        {
            return false;
        }

        let mirrored = self.connections[neighbor] | direction.opposite().bit();
        self.set_connections(cell, current | direction.bit());
        self.set_connections(neighbor, mirrored);
        self.set_other_end(end1, end2);
        self.set_other_end(end2, end1);
        true
    }

    /// Connects `cell` in every direction of `directions`, in bit order.
    ///
    /// Either all connections are made or none: on the first refusal the
    /// ones already made are rolled back and `false` is returned.
    pub fn connect_all(
        &mut self,
        cell: usize,
        directions: Directions,
        prune_tight_corners: bool,
    ) -> bool {
        let checkpoint = self.checkpoint();
        for direction in directions.directions() {
            if !self.connect(cell, direction, prune_tight_corners) {
                self.rollback(checkpoint);
                return false;
            }
        }
        true
    }

    /// Returns `true` if every connection is matched by its mirror.
    #[must_use]
    pub fn is_mirror_consistent(&self) -> bool {
        (0..self.grid.len()).all(|cell| {
            let mask = self.connections[cell];
            if self.grid.is_border(cell) {
                return mask.is_empty();
            }
            Direction::ALL.into_iter().all(|dir| {
                let neighbor = self.step(cell, dir.bit());
                mask.contains(dir.bit())
                    == self.connections[neighbor].contains(dir.opposite().bit())
            })
        })
    }

    /// Returns the flow label of every interior cell in row-major order.
    ///
    /// Labels spread from each endpoint along the connections; cells not
    /// reached from any endpoint are `None`.
    #[must_use]
    pub fn flow_labels(&self) -> Vec<Option<char>> {
        let mut labels = vec![None; self.grid.len()];
        let mut queue = VecDeque::new();
        for source in self.grid.sources() {
            labels[source] = self.grid.label(source);
            queue.push_back(source);
            while let Some(cell) = queue.pop_front() {
                for dir in self.connections[cell].directions() {
                    let next = self.step(cell, dir.bit());
                    if labels[next].is_none() {
                        labels[next] = labels[cell];
                        queue.push_back(next);
                    }
                }
            }
        }
        self.grid.cells().map(|cell| labels[cell]).collect()
    }

    /// Returns the text rows of the solution, every cell showing its flow label.
    #[must_use]
    pub fn solution_rows(&self) -> Vec<String> {
        let labels = self.flow_labels();
        labels
            .chunks(self.grid.width())
            .map(|row| {
                row.iter()
                    .map(|label| label.unwrap_or(EMPTY_CHAR))
                    .collect()
            })
            .collect()
    }
}
