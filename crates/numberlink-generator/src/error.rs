/// Errors that can occur while generating a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GeneratorError {
    /// The board has no room for a flow.
    ///
    /// Both dimensions must be positive, and the board must hold at least two
    /// cells.
    #[display("cannot generate a {width}x{height} puzzle")]
    Sizing {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// The puzzle has more flows than there are labels.
    #[display("{flows} flows exceed the {capacity} available labels")]
    LabelCapacity {
        /// Number of flows in the generated layout.
        flows: usize,
        /// Number of available labels.
        capacity: usize,
    },
}
