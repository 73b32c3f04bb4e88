//! Mode (most frequent values) with ties.

use std::collections::BTreeMap;

/// Returns every value tied for the highest frequency, in ascending order.
///
/// An empty input yields an empty `Vec`; a non-empty input always yields at least one value.
///
/// ```rust
/// use bikeshare_stats::stats::mode;
///
/// assert_eq!(mode([3, 1, 3, 1, 2]), vec![1, 3]);
/// assert_eq!(mode(Vec::<u32>::new()), Vec::<u32>::new());
/// ```
pub fn mode<T, I>(values: I) -> Vec<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }
    let Some(max) = counts.values().copied().max() else {
        return Vec::new();
    };
    counts
        .into_iter()
        .filter(|(_, n)| *n == max)
        .map(|(v, _)| v)
        .collect()
}
