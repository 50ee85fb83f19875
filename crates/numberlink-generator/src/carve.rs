//! Growing long flows out of the domino tiling.

use numberlink_core::Direction;
use rand::{Rng, seq::SliceRandom as _};

use crate::layout::FlowLayout;

/// Joins regions end to end until no more joins are possible.
///
/// Each pass visits the cells in random order. From every open end, the
/// region keeps absorbing a neighboring region through one of that region's
/// open ends, continuing from the far end of the absorbed part. Two regions
/// are only joined when the joining pair is their only contact, so a flow
/// never ends up running alongside itself. Passes repeat until one joins
/// nothing.
///
/// Returns the number of joins made.
pub(crate) fn carve<R>(layout: &mut FlowLayout, rng: &mut R) -> usize
where
    R: Rng,
{
    let mut order = (0..layout.len()).collect::<Vec<_>>();
    let mut total = 0;
    for pass in 1.. {
        order.shuffle(rng);
        let mut joins = 0;
        for &start in &order {
            if !layout.is_head(start) {
                continue;
            }
            let mut head = start;
            while let Some(next) = extend(layout, head, rng) {
                joins += 1;
                head = next;
            }
        }
        log::trace!("carving pass {pass}: {joins} joins");
        total += joins;
        if joins == 0 {
            break;
        }
    }
    log::trace!("carved layout: {:?}", layout.region_rows());
    total
}

/// Tries to join the region of `head` with one neighboring region.
///
/// Returns the new open end to continue from.
fn extend<R>(layout: &mut FlowLayout, head: usize, rng: &mut R) -> Option<usize>
where
    R: Rng,
{
    let mut directions = Direction::ALL;
    directions.shuffle(rng);
    for direction in directions {
        let Some(other) = layout.neighbor(head, direction) else {
            continue;
        };
        let (ours, theirs) = (layout.region(head), layout.region(other));
        if ours == theirs || !layout.is_head(other) || layout.contacts(ours, theirs) != 1 {
            continue;
        }
        let far = layout.far_end(other);
        layout.link(head, direction);
        layout.relabel(other, ours);
        return Some(far);
    }
    None
}
