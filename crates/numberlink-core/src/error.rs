/// Errors returned when a grid cannot be built from the supplied content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigurationError {
    /// Width or height is zero.
    #[display("width and height must be positive, got {width}x{height}")]
    EmptyDimension {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// The padded grid would not fit in memory addressable on this platform.
    #[display("a {width}x{height} grid is too large")]
    TooLarge {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// The content does not hold exactly `width * height` cells.
    #[display("expected {expected} cells, got {actual}")]
    ContentLength {
        /// `width * height`.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },
    /// The number of rows differs from the height.
    #[display("expected {expected} rows, got {actual}")]
    RowCount {
        /// The declared height.
        expected: usize,
        /// Number of rows supplied.
        actual: usize,
    },
    /// A row does not hold exactly `width` characters.
    #[display("row {row} has {actual} cells, expected {expected}")]
    RowWidth {
        /// Zero-based row index.
        row: usize,
        /// The declared width.
        expected: usize,
        /// Number of characters in the row.
        actual: usize,
    },
    /// A row contains whitespace or a control character.
    #[display("invalid character {ch:?} at row {row}, column {column}")]
    InvalidCharacter {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        column: usize,
        /// The offending character.
        ch: char,
    },
    /// Interior content contains a border cell.
    #[display("border cell inside the playable area at index {index}")]
    BorderInContent {
        /// Row-major index into the supplied content.
        index: usize,
    },
}
