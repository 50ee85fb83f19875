//! Domino tiling of the board, the starting point of every puzzle.

use numberlink_core::Direction;
use rand::{Rng, RngExt as _};

use crate::layout::FlowLayout;

/// Covers the board with dominoes.
///
/// Each column is covered by vertical dominoes over row pairs. If the height
/// is odd the last row is covered by horizontal dominoes instead, and if the
/// width is odd too the bottom-right cell is left as a single-cell region.
pub(crate) fn tile(width: usize, height: usize) -> FlowLayout {
    let mut layout = FlowLayout::new(width, height);
    let mut next_region = 0;
    let mut place = |layout: &mut FlowLayout, cell: usize, direction: Direction| {
        layout.set_region(cell, next_region);
        if let Some(other) = layout.neighbor(cell, direction) {
            layout.set_region(other, next_region);
            layout.link(cell, direction);
        }
        next_region += 1;
    };

    let paired_rows = height - height % 2;
    for x in 0..width {
        for y in (0..paired_rows).step_by(2) {
            let cell = layout.index(x, y);
            place(&mut layout, cell, Direction::South);
        }
    }
    if height % 2 == 1 {
        let y = height - 1;
        for x in (0..width - width % 2).step_by(2) {
            let cell = layout.index(x, y);
            place(&mut layout, cell, Direction::East);
        }
        if width % 2 == 1 {
            let cell = layout.index(width - 1, y);
            layout.set_region(cell, next_region);
        }
    }
    layout
}

/// Randomly rotates pairs of parallel dominoes.
///
/// Picks `(width * height)^2` random 2x2 blocks. A block covered by two
/// horizontal dominoes is re-covered by two vertical ones and vice versa;
/// any other block is left alone.
pub(crate) fn shuffle<R>(layout: &mut FlowLayout, rng: &mut R)
where
    R: Rng,
{
    let (width, height) = (layout.width(), layout.height());
    if width < 2 || height < 2 {
        return;
    }
    let cells = width * height;
    for _ in 0..cells * cells {
        let x = rng.random_range(0..width - 1);
        let y = rng.random_range(0..height - 1);
        rotate_block(layout, x, y);
    }
}

fn rotate_block(layout: &mut FlowLayout, x: usize, y: usize) {
    let nw = layout.index(x, y);
    let ne = layout.index(x + 1, y);
    let sw = layout.index(x, y + 1);
    let se = layout.index(x + 1, y + 1);

    if layout.is_linked(nw, Direction::East) && layout.is_linked(sw, Direction::East) {
        layout.unlink(nw, Direction::East);
        layout.unlink(sw, Direction::East);
        layout.link(nw, Direction::South);
        layout.link(ne, Direction::South);
        let (top, bottom) = (layout.region(nw), layout.region(sw));
        layout.set_region(sw, top);
        layout.set_region(ne, bottom);
        layout.set_region(se, bottom);
    } else if layout.is_linked(nw, Direction::South) && layout.is_linked(ne, Direction::South) {
        layout.unlink(nw, Direction::South);
        layout.unlink(ne, Direction::South);
        layout.link(nw, Direction::East);
        layout.link(sw, Direction::East);
        let (left, right) = (layout.region(nw), layout.region(ne));
        layout.set_region(ne, left);
        layout.set_region(sw, right);
        layout.set_region(se, right);
    }
}

/// Merges the single-cell region left by odd dimensions into a neighbor.
///
/// The bottom-right cell joins the horizontal domino on its left if there is
/// one. Otherwise the domino above it must be vertical, and the cell joins
/// that one. Either way the merged region is a straight three-cell path.
pub(crate) fn absorb_odd_corner(layout: &mut FlowLayout) {
    let (width, height) = (layout.width(), layout.height());
    if width % 2 == 0 || height % 2 == 0 {
        return;
    }
    let corner = layout.index(width - 1, height - 1);
    let direction = match layout.neighbor(corner, Direction::West) {
        Some(left) if layout.is_linked(left, Direction::West) => Direction::West,
        _ => Direction::North,
    };
    let Some(other) = layout.neighbor(corner, direction) else {
        return;
    };
    layout.link(corner, direction);
    layout.set_region(corner, layout.region(other));
}
