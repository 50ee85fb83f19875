use numberlink_core::{Direction, Directions};

/// A rectangle partitioned into flows under construction.
///
/// Every cell carries the id of the region it belongs to and the links to
/// the cells it follows or precedes on that region's path. Regions are kept
/// as simple paths: cells of one region are linked in a single chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FlowLayout {
    width: usize,
    height: usize,
    regions: Vec<usize>,
    links: Vec<Directions>,
}

impl FlowLayout {
    /// Creates a layout where every cell is its own unlinked region.
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            regions: (0..width * height).collect(),
            links: vec![Directions::empty(); width * height],
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn len(&self) -> usize {
        self.regions.len()
    }

    pub(crate) fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    pub(crate) fn region(&self, cell: usize) -> usize {
        self.regions[cell]
    }

    #[cfg(test)]
    pub(crate) fn regions(&self) -> &[usize] {
        &self.regions
    }

    pub(crate) fn regions_mut(&mut self) -> &mut [usize] {
        &mut self.regions
    }

    pub(crate) fn set_region(&mut self, cell: usize, region: usize) {
        self.regions[cell] = region;
    }

    /// Returns the neighbor of `cell` in `direction`, if it is inside.
    pub(crate) fn neighbor(&self, cell: usize, direction: Direction) -> Option<usize> {
        let (x, y) = (cell % self.width, cell / self.width);
        let (dx, dy) = direction.delta();
        let x = x.checked_add_signed(dx).filter(|&x| x < self.width)?;
        let y = y.checked_add_signed(dy).filter(|&y| y < self.height)?;
        Some(self.index(x, y))
    }

    /// Links `cell` with its neighbor in `direction` on both sides.
    pub(crate) fn link(&mut self, cell: usize, direction: Direction) {
        if let Some(other) = self.neighbor(cell, direction) {
            self.links[cell] |= direction.bit();
            self.links[other] |= direction.opposite().bit();
        }
    }

    /// Removes the link between `cell` and its neighbor in `direction`.
    pub(crate) fn unlink(&mut self, cell: usize, direction: Direction) {
        if let Some(other) = self.neighbor(cell, direction) {
            self.links[cell] -= direction.bit();
            self.links[other] -= direction.opposite().bit();
        }
    }

    pub(crate) fn is_linked(&self, cell: usize, direction: Direction) -> bool {
        self.links[cell].contains(direction.bit())
    }

    /// Returns `true` if `cell` is an open end of its region's path.
    pub(crate) fn is_head(&self, cell: usize) -> bool {
        self.links[cell].bits().count_ones() < 2
    }

    /// Follows the links from the head `start` to the opposite end.
    pub(crate) fn far_end(&self, start: usize) -> usize {
        let mut cell = start;
        let mut arrived = Directions::empty();
        loop {
            let onward = self.links[cell] - arrived;
            let Some(dir) = onward.directions().next() else {
                return cell;
            };
            let Some(next) = self.neighbor(cell, dir) else {
                return cell;
            };
            cell = next;
            arrived = dir.opposite().bit();
        }
    }

    /// Moves every cell linked to `start` into `region`.
    pub(crate) fn relabel(&mut self, start: usize, region: usize) {
        let mut stack = vec![start];
        while let Some(cell) = stack.pop() {
            if self.regions[cell] == region {
                continue;
            }
            self.regions[cell] = region;
            for dir in self.links[cell].directions() {
                if let Some(next) = self.neighbor(cell, dir) {
                    stack.push(next);
                }
            }
        }
    }

    /// Counts the adjacent cell pairs with one cell in each of two regions.
    pub(crate) fn contacts(&self, a: usize, b: usize) -> usize {
        let mut count = 0;
        for cell in 0..self.len() {
            for dir in [Direction::East, Direction::South] {
                let Some(other) = self.neighbor(cell, dir) else {
                    continue;
                };
                let pair = (self.regions[cell], self.regions[other]);
                if pair == (a, b) || pair == (b, a) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Returns the rows of region ids, for inspection in tests and logs.
    pub(crate) fn region_rows(&self) -> Vec<Vec<usize>> {
        self.regions
            .chunks(self.width)
            .map(<[usize]>::to_vec)
            .collect()
    }
}
