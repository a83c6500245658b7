//! Edit distances over character sequences.

use std::cmp::{max, min};

/// Length of the longest common subsequence of two sequences.
///
/// Uses two rolling rows, so memory is linear in the length of `b`.
#[allow(clippy::needless_range_loop)]
pub fn lcs_length<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev_row = vec![0usize; b.len() + 1];
    let mut curr_row = vec![0usize; b.len() + 1];

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            curr_row[j] = if a[i - 1] == b[j - 1] {
                prev_row[j - 1] + 1
            } else {
                max(prev_row[j], curr_row[j - 1])
            };
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

/// Indel distance: the minimum number of insertions and deletions (no
/// substitutions) that turn `a` into `b`.
pub fn indel_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.len() + b.len() - 2 * lcs_length(a, b)
}

/// Optimal string alignment distance (Levenshtein plus adjacent
/// transpositions), or `None` once it is known to exceed `threshold`.
///
/// Stops as soon as a whole row of the matrix is above the threshold, so
/// far-apart words cost only a few rows.
#[allow(clippy::needless_range_loop)]
pub fn osa_distance_within<T: PartialEq>(a: &[T], b: &[T], threshold: usize) -> Option<usize> {
    if a.len().abs_diff(b.len()) > threshold {
        return None;
    }
    if a.is_empty() || b.is_empty() {
        return Some(max(a.len(), b.len()));
    }

    let mut before_prev: Vec<usize> = vec![0; b.len() + 1];
    let mut prev_row: Vec<usize> = (0..=b.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr_row[0] = i;
        let mut min_in_row = i;

        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut value = min(
                min(prev_row[j] + 1, curr_row[j - 1] + 1),
                prev_row[j - 1] + cost,
            );
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                value = min(value, before_prev[j - 2] + 1);
            }
            curr_row[j] = value;
            min_in_row = min(min_in_row, value);
        }

        if min_in_row > threshold {
            return None;
        }

        std::mem::swap(&mut before_prev, &mut prev_row);
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[b.len()];
    (distance <= threshold).then_some(distance)
}
