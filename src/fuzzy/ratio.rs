//! Normalized similarity ratios on a 0–100 scale.
//!
//! - [`ratio`]: whole-string indel similarity, `200 * lcs / (|a| + |b|)`.
//! - [`partial_ratio`]: best [`ratio`] of the shorter string against every
//!   equal-length window of the longer one.
//! - [`token_set_ratio`]: order- and duplicate-insensitive token overlap.
//!
//! Lengths are measured in characters after [`normalize`].

use std::collections::BTreeSet;

use crate::fuzzy::distance::indel_distance;

/// Lowercase `text`, turn every non-alphanumeric character into a space,
/// collapse whitespace runs and trim the ends.
pub fn normalize(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());

    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
    {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.extend(word.chars().flat_map(char::to_lowercase));
    }

    normalized
}

/// Indel similarity of two already-normalized character sequences.
fn chars_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    100.0 * (1.0 - indel_distance(a, b) as f64 / total as f64)
}

fn str_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    chars_ratio(&a, &b)
}

/// Whole-string similarity. Two empty strings are identical (100).
pub fn ratio(a: &str, b: &str) -> f64 {
    str_ratio(&normalize(a), &normalize(b))
}

/// Best-aligned substring similarity.
///
/// Returns 0 when exactly one side is empty and 100 when both are.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = normalize(a).chars().collect();
    let b: Vec<char> = normalize(b).chars().collect();

    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if shorter.is_empty() {
        return if longer.is_empty() { 100.0 } else { 0.0 };
    }

    let mut best = 0.0f64;
    for window in longer.windows(shorter.len()) {
        best = best.max(chars_ratio(&shorter, window));
        if best >= 100.0 {
            break;
        }
    }

    best
}

fn join_parts(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{head} {tail}"),
    }
}

/// Token overlap similarity, insensitive to word order and repetition.
///
/// With `s` the sorted shared tokens and `t1`/`t2` the shared tokens followed
/// by each side's remaining sorted tokens, the score is the best of
/// `ratio(s, t1)`, `ratio(s, t2)` and `ratio(t1, t2)`. Returns 0 if either
/// side has no tokens.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    let tokens_a: BTreeSet<&str> = a.split(' ').filter(|t| !t.is_empty()).collect();
    let tokens_b: BTreeSet<&str> = b.split(' ').filter(|t| !t.is_empty()).collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let sect = tokens_a
        .intersection(&tokens_b)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let diff_ab = tokens_a
        .difference(&tokens_b)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let diff_ba = tokens_b
        .difference(&tokens_a)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    let combined_ab = join_parts(&sect, &diff_ab);
    let combined_ba = join_parts(&sect, &diff_ba);

    str_ratio(&sect, &combined_ab)
        .max(str_ratio(&sect, &combined_ba))
        .max(str_ratio(&combined_ab, &combined_ba))
}
