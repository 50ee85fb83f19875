use numberlink_core::{Directions, Grid};

/// Cells where a flow may turn without being fed from above or the left.
///
/// A south-east corner (a cell connecting only east and south) wraps around
/// whatever lies diagonally south-east of it, and in a valid solution that
/// chain of nested corners must end in an endpoint. So a cell can only be a
/// south-east corner if walking south-east from it over empty cells reaches
/// an endpoint. The same holds for south-west corners and the south-west
/// diagonal.
///
/// The tables are computed once per grid by casting rays from each endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotTables {
    south_east: Vec<bool>,
    south_west: Vec<bool>,
}

impl PivotTables {
    /// Computes the pivot tables of a grid.
    #[must_use]
    pub fn new(grid: &Grid) -> Self {
        let mut south_east = vec![false; grid.len()];
        let mut south_west = vec![false; grid.len()];
        for source in grid.sources() {
            cast_ray(grid, source, Directions::NORTH_WEST, &mut south_east);
            cast_ray(grid, source, Directions::NORTH_EAST, &mut south_west);
        }
        Self {
            south_east,
            south_west,
        }
    }

    /// Returns `true` if `cell` may connect east and south only.
    #[must_use]
    pub fn allows_south_east(&self, cell: usize) -> bool {
        self.south_east[cell]
    }

    /// Returns `true` if `cell` may turn from west to south.
    #[must_use]
    pub fn allows_south_west(&self, cell: usize) -> bool {
        self.south_west[cell]
    }
}

fn cast_ray(grid: &Grid, source: usize, diagonal: Directions, table: &mut [bool]) {
    let mut cell = grid.step(source, diagonal);
    while grid.content(cell).is_empty() {
        table[cell] = true;
        cell = grid.step(cell, diagonal);
    }
}
