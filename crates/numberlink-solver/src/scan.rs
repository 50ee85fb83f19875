use numberlink_core::{Corner, Grid};

/// The order in which the solver decides cells.
///
/// Cells are visited by antidiagonals: every start cell on the top row
/// (west to east) and then on the right column (north to south) begins a
/// sweep towards the south-west. When a cell is visited, its north,
/// north-west, west and north-east neighbors have all been visited before it,
/// which is what makes the solver's local checks on those neighbors sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOrder {
    next: Vec<usize>,
    first: usize,
    last: usize,
}

impl ScanOrder {
    /// Computes the scan order of a grid.
    #[must_use]
    pub fn new(grid: &Grid) -> Self {
        let stride = grid.stride();
        let north_west = grid.corner(Corner::NorthWest);
        let north_east = grid.corner(Corner::NorthEast);
        let south_east = grid.corner(Corner::SouthEast);

        let mut next = (0..grid.len()).collect::<Vec<_>>();
        let mut previous: Option<usize> = None;
        let starts = (north_west..north_east).chain((north_east..=south_east).step_by(stride));
        for start in starts {
            let mut cell = start;
            while !grid.is_border(cell) {
                if let Some(prev) = previous {
                    next[prev] = cell;
                }
                previous = Some(cell);
                cell += stride - 1;
            }
        }

        Self {
            next,
            first: north_west,
            last: south_east,
        }
    }

    /// Returns the first cell to decide (the north-west corner).
    #[must_use]
    pub fn first(&self) -> usize {
        self.first
    }

    /// Returns the terminal cell (the south-east corner).
    #[must_use]
    pub fn last(&self) -> usize {
        self.last
    }

    /// Returns the cell decided after `cell`.
    #[must_use]
    pub fn next(&self, cell: usize) -> usize {
        self.next[cell]
    }

    /// Iterates over all interior cells in scan order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let mut cell = Some(self.first);
        std::iter::from_fn(move || {
            let current = cell?;
            cell = (current != self.last).then(|| self.next[current]);
            Some(current)
        })
    }
}
