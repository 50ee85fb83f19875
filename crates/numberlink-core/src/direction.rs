//! Compass directions and connection masks.

use std::fmt::{self, Display};

/// One of the four grid directions.
///
/// # Examples
///
/// ```
/// use numberlink_core::{Direction, Directions};
///
/// assert_eq!(Direction::North.opposite(), Direction::South);
/// assert_eq!(Direction::East.bit(), Directions::EAST);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Towards the previous row.
    North,
    /// Towards the next column.
    East,
    /// Towards the next row.
    South,
    /// Towards the previous column.
    West,
}

impl Direction {
    /// All directions in mask bit order (north, east, south, west).
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Returns the direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Returns the single-bit mask for this direction.
    #[must_use]
    pub const fn bit(self) -> Directions {
        match self {
            Self::North => Directions::NORTH,
            Self::East => Directions::EAST,
            Self::South => Directions::SOUTH,
            Self::West => Directions::WEST,
        }
    }

    /// Returns the `(dx, dy)` unit step of this direction.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };
        f.write_str(name)
    }
}

bitflags::bitflags! {
    /// A set of directions a cell connects to.
    ///
    /// The bit layout (N=1, E=2, S=4, W=8) is relied upon by renderers that
    /// index lookup tables with [`Directions::bits`].
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Directions: u8 {
        /// Connected to the north neighbor.
        const NORTH = 0b0001;
        /// Connected to the east neighbor.
        const EAST = 0b0010;
        /// Connected to the south neighbor.
        const SOUTH = 0b0100;
        /// Connected to the west neighbor.
        const WEST = 0b1000;
    }
}

impl Directions {
    /// A corner turning between north and east.
    pub const NORTH_EAST: Self = Self::NORTH.union(Self::EAST);
    /// A corner turning between north and west.
    pub const NORTH_WEST: Self = Self::NORTH.union(Self::WEST);
    /// A corner turning between south and east.
    pub const SOUTH_EAST: Self = Self::SOUTH.union(Self::EAST);
    /// A corner turning between south and west.
    pub const SOUTH_WEST: Self = Self::SOUTH.union(Self::WEST);

    /// Returns the mask with every direction replaced by its opposite.
    ///
    /// # Examples
    ///
    /// ```
    /// use numberlink_core::Directions;
    ///
    /// assert_eq!(Directions::WEST.mirror(), Directions::EAST);
    /// assert_eq!(Directions::SOUTH_EAST.mirror(), Directions::NORTH_WEST);
    /// ```
    #[must_use]
    pub const fn mirror(self) -> Self {
        let bits = self.bits();
        Self::from_bits_retain(((bits << 2) | (bits >> 2)) & 0b1111)
    }

    /// Returns `true` if the mask is exactly two perpendicular directions.
    #[must_use]
    pub const fn is_corner(self) -> bool {
        matches!(self.bits(), 0b0011 | 0b0110 | 0b1100 | 0b1001)
    }

    /// Iterates over the directions contained in the mask, in bit order.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |dir| self.contains(dir.bit()))
    }
}

impl From<Direction> for Directions {
    fn from(direction: Direction) -> Self {
        direction.bit()
    }
}
