//! Reading puzzles from a text stream.
//!
//! A stream is a sequence of frames. Each frame is a `width height` header
//! line followed by `height` rows of the grid. Blank lines and lines starting
//! with `#` are skipped before a header. A `0 0` header or the end of input
//! ends the stream.
//!
//! ```text
//! # a comment
//! 4 1
//! A..A
//!
//! 2 2
//! AB
//! AB
//! 0 0
//! ```

use std::io::BufRead;

use numberlink_core::{ConfigurationError, Grid};

/// Errors that can occur while reading a puzzle stream.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum StreamError {
    /// Reading from the underlying input failed.
    #[display("cannot read input: {_0}")]
    Io(#[from] std::io::Error),
    /// A header line is not two non-negative integers.
    #[display("expected 'width height' at line {line}, got {text:?}")]
    BadHeader {
        /// Line number, starting at 1.
        line: usize,
        /// The offending line.
        text: String,
    },
    /// The input ended before all rows of a frame were read.
    #[display("input ended after {actual} of {expected} rows at line {line}")]
    TruncatedFrame {
        /// Line number of the last line read.
        line: usize,
        /// Number of rows announced by the header.
        expected: usize,
        /// Number of rows found.
        actual: usize,
    },
    /// The rows do not form a valid grid.
    #[display("invalid puzzle: {_0}")]
    Config(#[from] ConfigurationError),
}

/// Reads puzzles frame by frame from a buffered reader.
///
/// The reader is also an [`Iterator`] over the grids; iteration stops after
/// the first error.
///
/// # Examples
///
/// ```
/// use numberlink_cli::stream::PuzzleReader;
///
/// let input = "# two puzzles\n4 1\nA..A\n\n2 2\nAB\nAB\n";
/// let grids = PuzzleReader::new(input.as_bytes()).collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(grids.len(), 2);
/// assert_eq!(grids[1].rows(), ["AB", "AB"]);
/// # Ok::<(), numberlink_cli::stream::StreamError>(())
/// ```
#[derive(Debug)]
pub struct PuzzleReader<R> {
    reader: R,
    line: usize,
    finished: bool,
}

impl<R> PuzzleReader<R>
where
    R: BufRead,
{
    /// Creates a reader over `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            finished: false,
        }
    }

    /// Returns the number of lines read so far.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Reads the next frame.
    ///
    /// Returns `Ok(None)` at a `0 0` header or at the end of input.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError`] if reading fails, a header is malformed, the
    /// input ends inside a frame, or the rows are not a valid grid.
    pub fn read_grid(&mut self) -> Result<Option<Grid>, StreamError> {
        if self.finished {
            return Ok(None);
        }
        let Some((width, height)) = self.read_header()? else {
            self.finished = true;
            return Ok(None);
        };
        if width == 0 && height == 0 {
            self.finished = true;
            return Ok(None);
        }

        let mut rows = Vec::new();
        while rows.len() < height {
            let Some(row) = self.read_line()? else {
                return Err(StreamError::TruncatedFrame {
                    line: self.line,
                    expected: height,
                    actual: rows.len(),
                });
            };
            rows.push(row.trim().to_owned());
        }
        Ok(Some(Grid::from_rows(width, height, &rows)?))
    }

    fn read_header(&mut self) -> Result<Option<(usize, usize)>, StreamError> {
        while let Some(line) = self.read_line()? {
            let text = line.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            let mut parts = text.split_whitespace().map(str::parse::<usize>);
            return match (parts.next(), parts.next(), parts.next()) {
                (Some(Ok(width)), Some(Ok(height)), None) => Ok(Some((width, height))),
                _ => Err(StreamError::BadHeader {
                    line: self.line,
                    text: text.to_owned(),
                }),
            };
        }
        Ok(None)
    }

    fn read_line(&mut self) -> Result<Option<String>, StreamError> {
        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        Ok(Some(buf))
    }
}

impl<R> Iterator for PuzzleReader<R>
where
    R: BufRead,
{
    type Item = Result<Grid, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_grid() {
            Ok(grid) => grid.map(Ok),
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
