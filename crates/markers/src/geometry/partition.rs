//! Partitioning the normalized perimeter into gapped per-port ranges.

/// Fraction of the whole perimeter reserved as visual separation at each
/// boundary between adjacent arcs.
pub const DEFAULT_GAP: f64 = 0.03;

/// Split the perimeter fraction space `[0, 1)` into `count` gapped ranges.
///
/// Range `i` is `(i/count + gap/2, (i+1)/count - gap/2)`. With `count == 1`
/// this intentionally yields a single near-full ring broken by one gap
/// centered at the seam, not a special case. Valid for `gap * count < 1`;
/// the operating range is small counts (the badge caps displayed ports) with
/// `gap` around [`DEFAULT_GAP`].
pub fn segment_ranges(count: usize, gap: f64) -> Vec<(f64, f64)> {
    let count = count.max(1);
    let slice = 1.0 / count as f64;

    (0..count)
        .map(|i| {
            let start = i as f64 * slice + gap / 2.0;
            let end = (i + 1) as f64 * slice - gap / 2.0;
            (start, end)
        })
        .collect()
}
