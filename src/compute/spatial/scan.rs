//! Range scanning over a geohash-sorted slice.

use super::neighbors::HashRange;

/// Entries that can be scanned by geohash.
pub trait Hashed {
    fn geohash(&self) -> u64;
}

impl<T: Hashed + ?Sized> Hashed for std::sync::Arc<T> {
    fn geohash(&self) -> u64 {
        (**self).geohash()
    }
}

/// Index of the first entry whose hash is `>= lower`, or `entries.len()`.
pub fn lower_bound<T: Hashed>(entries: &[T], lower: u64) -> usize {
    entries.partition_point(|entry| entry.geohash() < lower)
}

/// Entries of `sorted` whose hash falls in `range`, as a contiguous slice.
///
/// `sorted` must be ordered by ascending geohash.
pub fn scan_range<T: Hashed>(sorted: &[T], range: HashRange) -> &[T] {
    let start = lower_bound(sorted, range.lower);
    let len = sorted[start..]
        .iter()
        .take_while(|entry| entry.geohash() < range.upper)
        .count();
    &sorted[start..start + len]
}

/// Walk every range in order and hand each matching entry to `visit`.
///
/// Ranges are expected not to overlap, so no entry is visited twice.
pub fn scan<'a, 'r, T, I, F>(sorted: &'a [T], ranges: I, mut visit: F)
where
    T: Hashed,
    I: IntoIterator<Item = &'r HashRange>,
    F: FnMut(&'a T),
{
    for range in ranges {
        scan_range(sorted, *range).iter().for_each(&mut visit);
    }
}
