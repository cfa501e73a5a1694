//! Encoder-driven row selection

/// Pick the next highlighted row
///
/// Moves down one row for a positive `delta` and up one row for a negative
/// one, clamped to `0..row_count` with no wraparound. A delta of several
/// detents still moves a single row per call.
pub fn select_row(current: usize, delta: i32, row_count: usize) -> usize {
    if row_count == 0 {
        return 0;
    }
    let last = row_count - 1;
    let current = current.min(last);

    if delta > 0 && current < last {
        current + 1
    } else if delta < 0 && current > 0 {
        current - 1
    } else {
        current
    }
}
