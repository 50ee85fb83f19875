//! Cell contents and interior positions.

use std::fmt::{self, Display};

/// The character used for empty cells in the text form.
pub const EMPTY_CHAR: char = '.';

/// The character used for border cells when a padded grid is printed.
pub const BORDER_CHAR: char = '#';

/// What a single grid cell holds.
///
/// # Examples
///
/// ```
/// use numberlink_core::CellContent;
///
/// assert_eq!(CellContent::from_char('.'), CellContent::Empty);
/// assert_eq!(CellContent::from_char('A'), CellContent::Endpoint('A'));
/// assert_eq!(CellContent::Endpoint('A').label(), Some('A'));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellContent {
    /// The sentinel ring around the playable area.
    Border,
    /// A cell to be filled by some flow.
    Empty,
    /// One of the two endpoints of the flow with this label.
    Endpoint(char),
}

impl CellContent {
    /// Interprets a text-form character: `.` is empty, anything else a label.
    #[must_use]
    pub const fn from_char(ch: char) -> Self {
        if ch == EMPTY_CHAR {
            Self::Empty
        } else {
            Self::Endpoint(ch)
        }
    }

    /// Returns the character used to print this cell.
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Self::Border => BORDER_CHAR,
            Self::Empty => EMPTY_CHAR,
            Self::Endpoint(label) => label,
        }
    }

    /// Returns the endpoint label, if any.
    #[must_use]
    pub const fn label(self) -> Option<char> {
        match self {
            Self::Endpoint(label) => Some(label),
            Self::Border | Self::Empty => None,
        }
    }

    /// Returns `true` for [`CellContent::Empty`].
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns `true` for [`CellContent::Border`].
    #[must_use]
    pub const fn is_border(self) -> bool {
        matches!(self, Self::Border)
    }

    /// Returns `true` for [`CellContent::Endpoint`].
    #[must_use]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Endpoint(_))
    }
}

impl Display for CellContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A position inside the playable area, `(0, 0)` being the top-left cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Column, counted from the left.
    pub x: usize,
    /// Row, counted from the top.
    pub y: usize,
}

impl Position {
    /// Creates a position from column and row.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
