//! The padded puzzle grid.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{CellContent, ConfigurationError, Direction, Directions, Position};

/// One of the four interior corners of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    /// Top-left interior cell.
    NorthWest,
    /// Top-right interior cell.
    NorthEast,
    /// Bottom-right interior cell.
    SouthEast,
    /// Bottom-left interior cell.
    SouthWest,
}

/// A rectangular puzzle grid surrounded by a one-cell border ring.
///
/// Cells are addressed by their index into a flat row-major buffer of the
/// padded grid. Because every interior cell has four in-bounds neighbors,
/// neighbor lookups from interior cells never need bounds checks; stepping
/// onto the ring is detected with [`Grid::is_border`].
///
/// # Examples
///
/// ```
/// use numberlink_core::{Direction, Grid, Position};
///
/// let grid: Grid = "A.\n.A".parse()?;
/// assert_eq!((grid.width(), grid.height()), (2, 2));
///
/// let a = grid.index(Position::new(0, 0));
/// assert!(grid.is_source(a));
/// assert!(grid.is_border(grid.neighbor(a, Direction::North)));
/// assert_eq!(grid.sources().count(), 2);
/// # Ok::<(), numberlink_core::ConfigurationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellContent>,
}

impl Grid {
    /// Builds a grid from interior content given in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if a dimension is zero, if `content`
    /// does not hold exactly `width * height` cells, or if it contains a
    /// [`CellContent::Border`].
    pub fn new(
        width: usize,
        height: usize,
        content: Vec<CellContent>,
    ) -> Result<Self, ConfigurationError> {
        if width == 0 || height == 0 {
            return Err(ConfigurationError::EmptyDimension { width, height });
        }
        let too_large = ConfigurationError::TooLarge { width, height };
        let expected = width.checked_mul(height).ok_or(too_large)?;
        if content.len() != expected {
            return Err(ConfigurationError::ContentLength {
                expected,
                actual: content.len(),
            });
        }
        if let Some(index) = content.iter().position(|cell| cell.is_border()) {
            return Err(ConfigurationError::BorderInContent { index });
        }

        let stride = width.checked_add(2).ok_or(too_large)?;
        let padded = height
            .checked_add(2)
            .and_then(|rows| rows.checked_mul(stride))
            .ok_or(too_large)?;
        let mut cells = vec![CellContent::Border; padded];
        for (row, chunk) in content.chunks_exact(width).enumerate() {
            let start = (row + 1) * stride + 1;
            cells[start..start + width].copy_from_slice(chunk);
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parses the text form: `height` rows of `width` characters each.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if a dimension is zero, if the rows do
    /// not match the dimensions, or if a row contains whitespace or control
    /// characters.
    pub fn from_rows<S>(width: usize, height: usize, rows: &[S]) -> Result<Self, ConfigurationError>
    where
        S: AsRef<str>,
    {
        if width == 0 || height == 0 {
            return Err(ConfigurationError::EmptyDimension { width, height });
        }
        if rows.len() != height {
            return Err(ConfigurationError::RowCount {
                expected: height,
                actual: rows.len(),
            });
        }
        for (row, line) in rows.iter().enumerate() {
            let actual = line.as_ref().chars().count();
            if actual != width {
                return Err(ConfigurationError::RowWidth {
                    row,
                    expected: width,
                    actual,
                });
            }
        }

        // The rows hold exactly `width * height` characters, so this cannot
        // overflow.
        let mut content = Vec::with_capacity(width * height);
        for (row, line) in rows.iter().enumerate() {
            for (column, ch) in line.as_ref().chars().enumerate() {
                if ch.is_whitespace() || ch.is_control() {
                    return Err(ConfigurationError::InvalidCharacter { row, column, ch });
                }
                content.push(CellContent::from_char(ch));
            }
        }
        Self::new(width, height, content)
    }

    /// Returns the interior width.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the interior height.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the padded width, i.e. the index distance between two rows.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.width + 2
    }

    /// Returns the number of cells in the padded buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid has at least one interior cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the content of a cell.
    #[must_use]
    pub fn content(&self, cell: usize) -> CellContent {
        self.cells[cell]
    }

    /// Returns the endpoint label of a cell, if it is an endpoint.
    #[must_use]
    pub fn label(&self, cell: usize) -> Option<char> {
        self.cells[cell].label()
    }

    /// Returns `true` if the cell belongs to the border ring.
    #[must_use]
    pub fn is_border(&self, cell: usize) -> bool {
        self.cells[cell].is_border()
    }

    /// Returns `true` if the cell is an endpoint.
    #[must_use]
    pub fn is_source(&self, cell: usize) -> bool {
        self.cells[cell].is_endpoint()
    }

    /// Returns the buffer index of an interior position.
    ///
    /// # Panics
    ///
    /// Panics if the position lies outside the interior.
    #[must_use]
    pub fn index(&self, pos: Position) -> usize {
        assert!(
            pos.x < self.width && pos.y < self.height,
            "position {pos} outside a {}x{} grid",
            self.width,
            self.height
        );
        (pos.y + 1) * self.stride() + pos.x + 1
    }

    /// Returns the interior position of a cell, or `None` for border cells.
    #[must_use]
    pub fn position(&self, cell: usize) -> Option<Position> {
        if cell >= self.cells.len() || self.is_border(cell) {
            return None;
        }
        let stride = self.stride();
        Some(Position::new(cell % stride - 1, cell / stride - 1))
    }

    /// Returns the index offset of a (possibly combined) direction mask.
    ///
    /// Combined masks add their components, so `NORTH | WEST` yields the
    /// offset of the north-west diagonal neighbor.
    #[must_use]
    pub fn offset(&self, directions: Directions) -> isize {
        #[expect(clippy::cast_possible_wrap)]
        let stride = self.stride() as isize;
        directions
            .directions()
            .map(|dir| {
                let (dx, dy) = dir.delta();
                dx + dy * stride
            })
            .sum()
    }

    /// Returns the cell reached from `cell` by the offset of `directions`.
    ///
    /// `cell` must not be a border cell, so the result stays in the buffer.
    #[must_use]
    pub fn step(&self, cell: usize, directions: Directions) -> usize {
        let next = cell.wrapping_add_signed(self.offset(directions));
        debug_assert!(next < self.cells.len());
        next
    }

    /// Returns the neighbor of `cell` in `direction`.
    #[must_use]
    pub fn neighbor(&self, cell: usize, direction: Direction) -> usize {
        self.step(cell, direction.bit())
    }

    /// Returns the index of an interior corner.
    #[must_use]
    pub fn corner(&self, corner: Corner) -> usize {
        let (x, y) = match corner {
            Corner::NorthWest => (0, 0),
            Corner::NorthEast => (self.width - 1, 0),
            Corner::SouthEast => (self.width - 1, self.height - 1),
            Corner::SouthWest => (0, self.height - 1),
        };
        self.index(Position::new(x, y))
    }

    /// Iterates over interior cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = usize> + '_ {
        let stride = self.stride();
        (1..=self.height).flat_map(move |y| (1..=self.width).map(move |x| y * stride + x))
    }

    /// Iterates over endpoint cells in row-major order.
    pub fn sources(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells().filter(|&cell| self.is_source(cell))
    }

    /// Returns the text-form rows of the interior.
    #[must_use]
    pub fn rows(&self) -> Vec<String> {
        let stride = self.stride();
        (1..=self.height)
            .map(|y| {
                self.cells[y * stride + 1..=y * stride + self.width]
                    .iter()
                    .map(|cell| cell.to_char())
                    .collect()
            })
            .collect()
    }
}

impl FromStr for Grid {
    type Err = ConfigurationError;

    /// Parses newline-separated rows, ignoring surrounding whitespace and
    /// blank lines. The width is taken from the first row.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        let width = rows.first().map_or(0, |row| row.chars().count());
        Self::from_rows(width, rows.len(), &rows)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_new_pads_with_border() {
        let grid = Grid::new(
            2,
            1,
            vec![CellContent::Endpoint('A'), CellContent::Empty],
        )
        .unwrap();
        assert_eq!(grid.stride(), 4);
        assert_eq!(grid.len(), 12);
        let border = (0..grid.len()).filter(|&c| grid.is_border(c)).count();
        assert_eq!(border, 10);
        assert_eq!(grid.content(5), CellContent::Endpoint('A'));
        assert_eq!(grid.content(6), CellContent::Empty);
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        assert_eq!(
            Grid::new(0, 3, vec![]),
            Err(ConfigurationError::EmptyDimension {
                width: 0,
                height: 3
            })
        );
        assert_eq!(
            Grid::new(2, 2, vec![CellContent::Empty; 3]),
            Err(ConfigurationError::ContentLength {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(
            Grid::new(1, 2, vec![CellContent::Empty, CellContent::Border]),
            Err(ConfigurationError::BorderInContent { index: 1 })
        );
    }

    #[test]
    fn test_from_rows_rejects_mismatch() {
        assert_eq!(
            Grid::from_rows(3, 2, &["A.A"]),
            Err(ConfigurationError::RowCount {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            Grid::from_rows(3, 2, &["A.A", "B."]),
            Err(ConfigurationError::RowWidth {
                row: 1,
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            Grid::from_rows(2, 1, &["A "]),
            Err(ConfigurationError::InvalidCharacter {
                row: 0,
                column: 1,
                ch: ' '
            })
        );
    }

    #[test]
    fn test_huge_dimensions_are_errors() {
        assert_eq!(
            Grid::new(usize::MAX, 2, vec![]),
            Err(ConfigurationError::TooLarge {
                width: usize::MAX,
                height: 2
            })
        );
        assert_eq!(
            Grid::new(usize::MAX, 1, vec![]),
            Err(ConfigurationError::ContentLength {
                expected: usize::MAX,
                actual: 0
            })
        );
        assert_eq!(
            Grid::from_rows(1_000_000_000_000_000_000, 1, &["A"]),
            Err(ConfigurationError::RowWidth {
                row: 0,
                expected: 1_000_000_000_000_000_000,
                actual: 1
            })
        );
        assert_eq!(
            Grid::from_rows(1, usize::MAX, &["A"]),
            Err(ConfigurationError::RowCount {
                expected: usize::MAX,
                actual: 1
            })
        );
    }

    #[test]
    fn test_index_position_round_trip() {
        let grid: Grid = "A..\n...\n..A".parse().unwrap();
        for cell in grid.cells() {
            let pos = grid.position(cell).unwrap();
            assert_eq!(grid.index(pos), cell);
        }
        assert_eq!(grid.position(0), None);
        assert_eq!(grid.cells().count(), 9);
    }

    #[test]
    fn test_neighbors_and_steps() {
        let grid: Grid = "...\n.A.\n...".parse().unwrap();
        let center = grid.index(Position::new(1, 1));
        assert_eq!(
            grid.position(grid.neighbor(center, Direction::North)),
            Some(Position::new(1, 0))
        );
        assert_eq!(
            grid.position(grid.neighbor(center, Direction::West)),
            Some(Position::new(0, 1))
        );
        assert_eq!(
            grid.position(grid.step(center, Directions::NORTH_EAST)),
            Some(Position::new(2, 0))
        );
        assert_eq!(
            grid.position(grid.step(center, Directions::SOUTH_WEST)),
            Some(Position::new(0, 2))
        );
        assert_eq!(grid.step(center, Directions::empty()), center);
    }

    #[test]
    fn test_corners() {
        let grid: Grid = "....\n....".parse().unwrap();
        assert_eq!(
            grid.position(grid.corner(Corner::NorthWest)),
            Some(Position::new(0, 0))
        );
        assert_eq!(
            grid.position(grid.corner(Corner::NorthEast)),
            Some(Position::new(3, 0))
        );
        assert_eq!(
            grid.position(grid.corner(Corner::SouthEast)),
            Some(Position::new(3, 1))
        );
        assert_eq!(
            grid.position(grid.corner(Corner::SouthWest)),
            Some(Position::new(0, 1))
        );
    }

    #[test]
    fn test_display_round_trip() {
        let text = "A.B\n.B.\nA..";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid.to_string(), text);
        assert_eq!(grid.rows(), ["A.B", ".B.", "A.."]);
        assert_eq!(grid.sources().count(), 4);
    }

    proptest! {
        #[test]
        fn prop_neighbors_are_symmetric(width in 1usize..10, height in 1usize..10) {
            let grid = Grid::new(width, height, vec![CellContent::Empty; width * height]).unwrap();
            for cell in grid.cells() {
                let pos = grid.position(cell).unwrap();
                prop_assert_eq!(grid.index(pos), cell);
                for dir in Direction::ALL {
                    let next = grid.neighbor(cell, dir);
                    prop_assert!(next < grid.len());
                    if !grid.is_border(next) {
                        prop_assert_eq!(grid.neighbor(next, dir.opposite()), cell);
                    }
                }
            }
        }
    }
}
