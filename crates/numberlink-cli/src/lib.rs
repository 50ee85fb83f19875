//! Command-line front end for the Numberlink solver and generator.
//!
//! - [`stream`]: reading framed puzzles from text input.
//! - [`render`]: drawing solved grids as labels or box-drawing tubes, with
//!   optional ANSI colors.
//! - [`run`]: the solve and generate commands behind the `numberlink` binary.

pub mod render;
pub mod run;
pub mod stream;
