/// Renumbers connected regions of equal values to `0..n`.
///
/// `values` is a row-major grid `width` cells wide. Cells belong to the same
/// region when they hold the same value and are connected through
/// orthogonally adjacent cells of that value. Regions are numbered in the
/// order their first cell appears in row-major order. Compacting an already
/// compact grid changes nothing.
///
/// Returns the number of regions.
///
/// # Panics
///
/// Panics if `width` is zero while `values` is not empty.
///
/// # Examples
///
/// ```
/// use numberlink_generator::compact_regions;
///
/// let mut values = [3, 4, 5, 3, 5, 5];
/// assert_eq!(compact_regions(3, &mut values), 3);
/// assert_eq!(values, [0, 1, 2, 0, 2, 2]);
/// ```
pub fn compact_regions(width: usize, values: &mut [usize]) -> usize {
    if values.is_empty() {
        return 0;
    }
    assert!(width > 0, "a non-empty grid must have a width");
    let height = values.len().div_ceil(width);

    let mut compacted: Vec<Option<usize>> = vec![None; values.len()];
    let mut count = 0;
    let mut stack = Vec::new();
    for start in 0..values.len() {
        if compacted[start].is_some() {
            continue;
        }
        let value = values[start];
        compacted[start] = Some(count);
        stack.push(start);
        while let Some(cell) = stack.pop() {
            let (x, y) = (cell % width, cell / width);
            let neighbors = [
                (y > 0).then(|| cell - width),
                (x + 1 < width).then_some(cell + 1),
                (y + 1 < height).then_some(cell + width),
                (x > 0).then(|| cell - 1),
            ];
            for next in neighbors.into_iter().flatten() {
                if next < values.len() && compacted[next].is_none() && values[next] == value {
                    compacted[next] = Some(count);
                    stack.push(next);
                }
            }
        }
        count += 1;
    }

    for (value, id) in values.iter_mut().zip(compacted) {
        *value = id.unwrap_or_default();
    }
    count
}
