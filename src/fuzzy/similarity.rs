//! The similarity capability used by query correction and ranking.

use crate::fuzzy::ratio;

/// Three string-similarity measures on a 0–100 scale.
///
/// The search engine only depends on this trait, so any correctly specified
/// edit-distance and token-overlap algorithm can be substituted, and tests can
/// pin scores to exact values.
pub trait Similarity: Send + Sync {
    /// Whole-string similarity.
    fn ratio(&self, a: &str, b: &str) -> f64;

    /// Best-aligned substring similarity.
    fn partial_ratio(&self, a: &str, b: &str) -> f64;

    /// Order- and duplicate-insensitive token overlap similarity.
    fn token_set_ratio(&self, a: &str, b: &str) -> f64;
}

/// Default [`Similarity`] built on indel distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndelSimilarity;

impl Similarity for IndelSimilarity {
    fn ratio(&self, a: &str, b: &str) -> f64 {
        ratio::ratio(a, b)
    }

    fn partial_ratio(&self, a: &str, b: &str) -> f64 {
        ratio::partial_ratio(a, b)
    }

    fn token_set_ratio(&self, a: &str, b: &str) -> f64 {
        ratio::token_set_ratio(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indel_similarity_delegates() {
        let similarity: Box<dyn Similarity> = Box::new(IndelSimilarity);
        assert_eq!(similarity.ratio("avatar", "avatar"), 100.0);
        assert_eq!(similarity.partial_ratio("kgf", "kgf chapter 2"), 100.0);
        assert_eq!(similarity.token_set_ratio("chapter kgf", "KGF Chapter"), 100.0);
    }
}
