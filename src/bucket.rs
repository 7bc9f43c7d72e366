//! Interval lookup over sorted boundaries.

/// For each value, the number of boundaries `<= value`.
///
/// With sorted `boundaries = [b0, b1, ...]`, a value in `[b(i-1), b(i))` lands in bucket `i`
/// (values below `b0` land in bucket 0). Unsorted boundaries give unspecified buckets.
pub fn bucketize(boundaries: &[usize], values: &[usize]) -> Vec<usize> {
    debug_assert!(boundaries.windows(2).all(|w| w[0] <= w[1]));
    values.iter().map(|&v| boundaries.partition_point(|&b| b <= v)).collect()
}
